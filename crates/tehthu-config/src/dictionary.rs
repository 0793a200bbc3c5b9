use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_delimiter() -> char {
    '|'
}

fn default_left_name() -> String {
    "Left".to_string()
}

fn default_right_name() -> String {
    "Right".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Dictionary file to open at startup
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Field delimiter for plain-text dictionaries
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Display name used until the dictionary names its left language
    #[serde(default = "default_left_name")]
    pub left_name: String,
    /// Display name used until the dictionary names its right language
    #[serde(default = "default_right_name")]
    pub right_name: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
            left_name: default_left_name(),
            right_name: default_right_name(),
        }
    }
}
