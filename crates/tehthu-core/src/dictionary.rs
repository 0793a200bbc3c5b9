use std::path::PathBuf;

/// A dictionary row that configures the parse instead of mapping a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// `[Left] [Right]` on the first row
    LanguageNames { left: String, right: String },
    /// Single-character row switching the field delimiter for the rest of the parse
    Delimiter(char),
    /// `{left}<delim>{right}` word-ending substitution
    SuffixMapping { left: String, right: String },
}

/// One left/right word pair read from a dictionary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub left: String,
    pub right: String,
    /// 1-based row the pair was read from
    pub row: usize,
}

/// Record-by-record reader over a dictionary backing store.
///
/// Callers drain [`next_config_line`](Self::next_config_line) until it returns
/// `None`, then call [`next_mapping`](Self::next_mapping) until
/// [`at_end`](Self::at_end). Once a mapping row has been seen no further rows
/// are read as configuration.
pub trait DictionarySource {
    /// Human-readable format label
    fn format_name(&self) -> &str;

    /// Consume the current row if it is a configuration row.
    ///
    /// Returns `None` without advancing when the current row is a mapping or
    /// the source is exhausted.
    fn next_config_line(&mut self) -> Option<ConfigLine>;

    /// Read the current row as a mapping, always advancing.
    ///
    /// Returns `None` for empty or malformed rows.
    fn next_mapping(&mut self) -> Option<Mapping>;

    fn at_end(&self) -> bool;

    /// 1-based row number of the row about to be read
    fn current_row(&self) -> usize;
}

/// Split `[a]`/`[b]` cell values into language names
pub fn name_stanza(left: &str, right: &str) -> Option<(String, String)> {
    Some((unwrap_delimited(left, '[', ']')?, unwrap_delimited(right, '[', ']')?))
}

/// Split `{a}`/`{b}` cell values into a suffix pair
pub fn suffix_stanza(left: &str, right: &str) -> Option<(String, String)> {
    Some((unwrap_delimited(left, '{', '}')?, unwrap_delimited(right, '{', '}')?))
}

fn unwrap_delimited(value: &str, open: char, close: char) -> Option<String> {
    let value = value.trim();
    if value.chars().count() > 2 && value.starts_with(open) && value.ends_with(close) {
        Some(value[open.len_utf8()..value.len() - close.len_utf8()].to_string())
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Couldn't find a spreadsheet containing the dictionary in {}", .0.display())]
    NoUsableSheet(PathBuf),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid delimiter {0:?}")]
    InvalidDelimiter(char),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
