use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::log::LogConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod log;
pub mod translator;

pub use self::translator::SuffixOrder;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults overridden by `TEHTHU_*` environment variables
    pub fn new() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `var` returns for each `TEHTHU_*` key
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        config.apply_vars(var);
        config
    }

    /// Overlay `TEHTHU_*` values on top of this config
    pub fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TEHTHU_DICTIONARY").filter(|v| !v.trim().is_empty()) {
            self.dictionary.path = Some(PathBuf::from(path));
        }

        if let Some(delimiter) = var("TEHTHU_DELIMITER").and_then(|v| single_char(&v)) {
            self.dictionary.delimiter = delimiter;
        }

        if let Some(name) = var("TEHTHU_LEFT_NAME").filter(|v| !v.trim().is_empty()) {
            self.dictionary.left_name = name;
        }

        if let Some(name) = var("TEHTHU_RIGHT_NAME").filter(|v| !v.trim().is_empty()) {
            self.dictionary.right_name = name;
        }

        if let Some(capacity) = var("TEHTHU_LOG_CAPACITY").and_then(|v| v.parse().ok()) {
            self.log.capacity = capacity;
        }

        if let Some(enabled) = var("TEHTHU_EASTER_EGG").and_then(|v| parse_flag(&v)) {
            self.translator.easter_egg = enabled;
        }
    }
}

/// The only character of `value`. Surrounding whitespace is ignored unless the
/// whitespace itself is the character (a tab delimiter).
pub fn single_char(value: &str) -> Option<char> {
    fn only(value: &str) -> Option<char> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
    only(value).or_else(|| only(value.trim()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
