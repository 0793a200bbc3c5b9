//! Letter-case detection and transformation.
//!
//! A "letter" is any alphabetic character. Letters that are not uppercase are
//! treated as lowercase, so caseless scripts classify as `Lower`. Everything
//! else is a symbol and is never modified.

/// Casing pattern of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// Every letter is uppercase
    Caps,
    /// First letter uppercase, the rest lowercase
    Proper,
    /// Every letter is lowercase
    Lower,
    /// Contains letters but none of the patterns above apply
    Mixed,
    /// No letters at all, or empty
    Null,
}

/// Determine the casing pattern of `word`
pub fn classify(word: &str) -> CaseType {
    let mut letters = word.chars().filter(|c| c.is_alphabetic());

    let Some(first) = letters.next() else {
        return CaseType::Null;
    };

    let first_upper = first.is_uppercase();
    let mut rest_has_upper = false;
    let mut rest_has_lower = false;

    for c in letters {
        if c.is_uppercase() {
            rest_has_upper = true;
        } else {
            rest_has_lower = true;
        }
    }

    match (first_upper, rest_has_upper, rest_has_lower) {
        (true, _, false) => CaseType::Caps,
        (false, false, _) => CaseType::Lower,
        (true, false, true) => CaseType::Proper,
        _ => CaseType::Mixed,
    }
}

/// Rewrite the letters of `word` to follow `case`.
///
/// `Null` yields `None`. `Mixed` returns the word unchanged since there is no
/// canonical mixed form to pick.
pub fn apply(word: &str, case: CaseType) -> Option<String> {
    match case {
        CaseType::Null => None,
        CaseType::Caps => Some(word.to_uppercase()),
        CaseType::Lower => Some(word.to_lowercase()),
        CaseType::Mixed => Some(word.to_string()),
        CaseType::Proper => Some(to_proper(word)),
    }
}

fn to_proper(word: &str) -> String {
    let Some(start) = word.find(|c: char| c.is_alphabetic()) else {
        return word.to_string();
    };

    let (symbols, letters) = word.split_at(start);
    let mut chars = letters.chars();
    let mut out = String::with_capacity(word.len());
    out.push_str(symbols);

    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    for c in chars {
        out.extend(c.to_lowercase());
    }

    out
}
