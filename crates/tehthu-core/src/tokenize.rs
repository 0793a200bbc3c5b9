/// Characters that separate words in an input sentence
const WORD_BREAKS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Split a sentence into words, dropping empty pieces.
///
/// Newlines are word breaks like any other whitespace.
pub fn split(sentence: &str) -> Vec<&str> {
    sentence
        .split(WORD_BREAKS)
        .filter(|word| !word.is_empty())
        .collect()
}

/// True for a single token fully wrapped in `[...]` with something inside
pub fn is_literal(word: &str) -> bool {
    word.len() > 2 && word.starts_with('[') && word.ends_with(']')
}

/// Interior of a literal token, or `None` if `word` is not one
pub fn literal_text(word: &str) -> Option<&str> {
    if is_literal(word) {
        Some(&word[1..word.len() - 1])
    } else {
        None
    }
}

/// Split a sentence and merge bracket spans that contain whitespace.
///
/// A word that opens with `[` but does not close with `]` is joined with the
/// following words (single spaces) up to the first one ending in `]`. If no
/// such word exists the opening word stays an ordinary word and the scan
/// resumes right after it.
pub fn tokens(sentence: &str) -> Vec<String> {
    let words = split(sentence);
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let word = words[i];

        if word.starts_with('[') && !word.ends_with(']') {
            if let Some(close) = words[i + 1..].iter().position(|w| w.ends_with(']')) {
                let end = i + 1 + close;
                out.push(words[i..=end].join(" "));
                i = end + 1;
                continue;
            }
        }

        out.push(word.to_string());
        i += 1;
    }

    out
}
