use serde::{Deserialize, Serialize};

fn default_plural_strip() -> bool {
    true
}

fn default_easter_egg() -> bool {
    false
}

/// Order in which registered suffix rules are tried against an unknown word
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuffixOrder {
    /// Longest suffix first, ties broken by registration order
    #[default]
    LongestFirst,
    /// Registration order only
    Registration,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Retry left-to-right lookups of words ending in `s` without their last two characters
    #[serde(default = "default_plural_strip")]
    pub plural_strip: bool,
    /// Answer `amarok` with a random run of filler words
    #[serde(default = "default_easter_egg")]
    pub easter_egg: bool,
    #[serde(default)]
    pub suffix_order: SuffixOrder,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            plural_strip: default_plural_strip(),
            easter_egg: default_easter_egg(),
            suffix_order: SuffixOrder::default(),
        }
    }
}
