use std::collections::HashMap;

use tehthu_config::SuffixOrder;
use tehthu_core::Direction;
use tehthu_core::preprocess::lookup_key;

/// Case-folded word → translation candidates, in dictionary order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, Vec<String>>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the candidates of `key`.
    ///
    /// Returns every candidate when `key` already had one, i.e. the mapping is
    /// now ambiguous.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<&[String]> {
        let candidates = self.entries.entry(lookup_key(key)).or_default();
        candidates.push(value.to_string());
        (candidates.len() > 1).then_some(candidates.as_slice())
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(&lookup_key(key)).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Word ending → replacement endings, remembering registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixTable {
    rules: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl SuffixTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `replacement` for `suffix`; returns all replacements when ambiguous
    pub fn insert(&mut self, suffix: &str, replacement: &str) -> Option<&[String]> {
        if !self.rules.contains_key(suffix) {
            self.order.push(suffix.to_string());
        }
        let replacements = self.rules.entry(suffix.to_string()).or_default();
        replacements.push(replacement.to_string());
        (replacements.len() > 1).then_some(replacements.as_slice())
    }

    pub fn get(&self, suffix: &str) -> Option<&[String]> {
        self.rules.get(suffix).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in the order they should be tried
    pub fn ordered(&self, order: SuffixOrder) -> Vec<(&str, &[String])> {
        let mut keys: Vec<&String> = self.order.iter().collect();
        if order == SuffixOrder::LongestFirst {
            // stable: equal lengths keep registration order
            keys.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
        }
        keys.into_iter()
            .filter_map(|k| self.rules.get(k).map(|v| (k.as_str(), v.as_slice())))
            .collect()
    }
}

/// Everything one parse of a dictionary produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub left_to_right: MappingTable,
    pub right_to_left: MappingTable,
    pub left_suffixes: SuffixTable,
    pub right_suffixes: SuffixTable,
}

impl Tables {
    pub fn mappings(&self, direction: Direction) -> &MappingTable {
        match direction {
            Direction::LeftToRight => &self.left_to_right,
            Direction::RightToLeft => &self.right_to_left,
        }
    }

    /// Suffix rules keyed by endings of the language being translated from
    pub fn suffixes(&self, direction: Direction) -> &SuffixTable {
        match direction {
            Direction::LeftToRight => &self.left_suffixes,
            Direction::RightToLeft => &self.right_suffixes,
        }
    }
}

/// Counters from one build pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub format: String,
    pub mappings: usize,
    pub ambiguous: usize,
    pub skipped: usize,
    pub suffix_rules: usize,
}
