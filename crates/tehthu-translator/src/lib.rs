use std::path::PathBuf;

use rand::Rng;
use tehthu_config::Config;
use tehthu_config::translator::TranslatorConfig;
use tehthu_core::case::{self, CaseType};
use tehthu_core::dictionary::LoadError;
use tehthu_core::preprocess::{lookup_key, trim_symbols};
use tehthu_core::{tokenize, DiagnosticsLog, Direction, LanguageNames};
use tehthu_dictionary::{BuildReport, DictionaryStore};

const EASTER_EGG_WORD: &str = "amarok";
const EASTER_EGG_FILLER: &str = "wocka";

/// Word-for-word translator over one dictionary.
///
/// Methods taking `&mut self` replace the dictionary or its settings and must
/// not overlap with any other call; share the translator behind a lock when
/// more than one task needs it.
#[derive(Debug)]
pub struct Translator {
    store: DictionaryStore,
    config: TranslatorConfig,
}

/// Where a lookup found its candidates
struct Resolved<'a> {
    candidates: &'a [String],
    suffix: Option<&'a str>,
}

impl Translator {
    pub fn new(store: DictionaryStore, config: TranslatorConfig) -> Self {
        Self { store, config }
    }

    /// Open and parse the dictionary at `path`
    pub fn load(
        path: impl Into<PathBuf>,
        config: &Config,
        log: DiagnosticsLog,
    ) -> Result<Self, LoadError> {
        let store = DictionaryStore::open(path, &config.dictionary, log)?;
        Ok(Self::new(store, config.translator.clone()))
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn names(&self) -> &LanguageNames {
        self.store.names()
    }

    pub fn log(&self) -> &DiagnosticsLog {
        self.store.log()
    }

    pub fn set_file(&mut self, path: impl Into<PathBuf>) -> Result<BuildReport, LoadError> {
        self.store.set_file(path)
    }

    pub fn set_delimiter(&mut self, delimiter: char) -> Result<BuildReport, LoadError> {
        self.store.set_delimiter(delimiter)
    }

    pub fn set_language_names(&mut self, left: impl Into<String>, right: impl Into<String>) {
        self.store.set_language_names(left, right);
    }

    pub fn reparse(&mut self) -> Result<BuildReport, LoadError> {
        self.store.reparse()
    }

    pub fn add_suffix_mapping(&mut self, left: &str, right: &str) {
        self.store.add_suffix_mapping(left, right);
    }

    /// Translate every word of `sentence`, dropping the ones with no translation
    pub fn translate_sentence(&self, sentence: &str, direction: Direction) -> String {
        tokenize::tokens(sentence)
            .iter()
            .filter_map(|token| self.translate_word(token, direction))
            .filter(|word| !word.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Translate a single word.
    ///
    /// Symbols around the word are kept, the input's letter case is carried
    /// over to the result and `[bracketed]` words pass through untouched.
    pub fn translate_word(&self, word: &str, direction: Direction) -> Option<String> {
        let log = self.store.log();
        if word.trim().is_empty() {
            log.warning("Empty word passed to translate_word");
            return None;
        }

        if let Some(text) = tokenize::literal_text(word) {
            return Some(text.to_string());
        }

        if self.config.easter_egg && word.to_lowercase() == EASTER_EGG_WORD {
            return Some(filler(word));
        }

        let lowered = lookup_key(word);
        let (leading, key, trailing) = trim_symbols(&lowered);
        tracing::debug!(%direction, key, "Looking up word");

        let Some(resolved) = self.resolve(key, direction) else {
            log.note(format!("No translation for key `{key}'"));
            return None;
        };

        let candidate = resolved.candidates.first()?;
        if resolved.candidates.len() > 1 {
            log.note(format!(
                "{} \"{key}\" is ambiguous ({}); using \"{candidate}\"",
                self.names().source(direction),
                resolved.candidates.join(", ")
            ));
        }

        let mut text = candidate.clone();
        if let Some(suffix) = resolved.suffix {
            text.push_str(suffix);
        }

        let input_case = case::classify(word);
        let target_case = if key.chars().count() == 1 {
            match input_case {
                CaseType::Caps | CaseType::Proper => CaseType::Proper,
                other => other,
            }
        } else if case::classify(candidate) == CaseType::Mixed {
            CaseType::Mixed
        } else {
            input_case
        };

        // letterless input has no case, so nothing is emitted for it
        let cased = case::apply(&text, target_case)?;
        Some(format!("{leading}{cased}{trailing}"))
    }

    /// Exact match, then the plural heuristic, then suffix rules
    fn resolve(&self, key: &str, direction: Direction) -> Option<Resolved<'_>> {
        let table = self.store.mappings(direction);

        if let Some(candidates) = table.get(key) {
            return Some(Resolved {
                candidates,
                suffix: None,
            });
        }

        let len = key.chars().count();
        if self.config.plural_strip && direction == Direction::LeftToRight && len > 1 && key.ends_with('s') {
            // drops two characters, so "cats" is looked up as "ca"
            let base: String = key.chars().take(len - 2).collect();
            if let Some(candidates) = table.get(&base) {
                tracing::debug!(key, base = %base, "Plural match");
                return Some(Resolved {
                    candidates,
                    suffix: None,
                });
            }
        }

        for (ending, replacements) in self.store.suffixes(direction).ordered(self.config.suffix_order) {
            let ending_key = lookup_key(ending);
            let Some(base) = key.strip_suffix(ending_key.as_str()) else {
                continue;
            };
            if base.is_empty() || ending_key.is_empty() {
                continue;
            }

            if let Some(candidates) = table.get(base) {
                if replacements.len() > 1 {
                    self.store.log().note(format!(
                        "Suffix \"-{ending}\" is ambiguous ({}); using \"-{}\"",
                        replacements.join(", "),
                        replacements[0]
                    ));
                }
                tracing::debug!(key, base, ending, "Suffix match");
                return Some(Resolved {
                    candidates,
                    suffix: replacements.first().map(String::as_str),
                });
            }
        }

        None
    }
}

/// A random run of filler words in the case of `word`
fn filler(word: &str) -> String {
    let count = rand::thread_rng().gen_range(1..100);
    let phrase = vec![EASTER_EGG_FILLER; count].join(" ");
    case::apply(&phrase, case::classify(word)).unwrap_or(phrase)
}
