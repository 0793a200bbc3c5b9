use std::path::PathBuf;

/// Messages passed between the input reader, the event loop and the output loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Sentence to translate in the current direction
    TextInput(String),
    OpenDictionary(PathBuf),
    Reload,
    SwapDirection,
    ShowNames,
    Quit,

    ShowTranslation(Translation),
    DictionaryLoaded(DictionaryInfo),
    /// Plain status text for the user
    ShowMessage(String),
    /// One line drained from the diagnostics log
    LogLine(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub input: String,
    pub output: String,
    /// e.g. `English-to-Spanish`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryInfo {
    pub path: PathBuf,
    pub left: String,
    pub right: String,
    pub mappings: usize,
}
