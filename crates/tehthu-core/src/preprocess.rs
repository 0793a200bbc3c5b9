use unicode_normalization::UnicodeNormalization;

/// Canonical form of a dictionary key: NFC-composed and lowercased.
///
/// Keeps `é` typed as one code point and `e` + combining accent on the same key.
pub fn lookup_key(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Split `word` into (leading symbols, letters, trailing symbols).
///
/// A word without any letters is returned whole as the middle part so that
/// symbol-only dictionary entries (`&|y`) still resolve.
pub fn trim_symbols(word: &str) -> (&str, &str, &str) {
    let start = word.find(|c: char| c.is_alphabetic());
    let end = word
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, c)| i + c.len_utf8());

    match (start, end) {
        (Some(start), Some(end)) => (&word[..start], &word[start..end], &word[end..]),
        _ => ("", word, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_folds_case_and_composition() {
        assert_eq!(lookup_key("HELLO"), "hello");
        assert_eq!(lookup_key("Cafe\u{301}"), lookup_key("CAFÉ"));
    }

    #[test]
    fn test_trim_symbols() {
        assert_eq!(trim_symbols("¿qué?"), ("¿", "qué", "?"));
        assert_eq!(trim_symbols("\"hello,\""), ("\"", "hello", ",\""));
        assert_eq!(trim_symbols("t'pol"), ("", "t'pol", ""));
        assert_eq!(trim_symbols("word"), ("", "word", ""));
        assert_eq!(trim_symbols("&"), ("", "&", ""));
        assert_eq!(trim_symbols(""), ("", "", ""));
    }
}
