use std::path::Path;

use regex::Regex;
use tehthu_core::dictionary::{ConfigLine, DictionarySource, LoadError, Mapping};
use tehthu_core::DiagnosticsLog;

pub const DEFAULT_DELIMITER: char = '|';

/// Line-oriented `left|right` dictionary (`.teh` by convention)
pub struct PlainTextSource {
    name: String,
    lines: Vec<String>,
    cursor: usize,
    delimiter: char,
    patterns: Patterns,
    read_any: bool,
    found_first_mapping: bool,
    log: DiagnosticsLog,
}

struct Patterns {
    names: Regex,
    suffix: Regex,
    mapping: Regex,
}

impl Patterns {
    fn new(delimiter: char) -> Result<Self, LoadError> {
        let d = regex::escape(&delimiter.to_string());
        let compile =
            |pattern: String| Regex::new(&pattern).map_err(|_| LoadError::InvalidDelimiter(delimiter));

        Ok(Self {
            names: compile(format!(r"^\[([^\[\]]+)\](?:\s+|\s*{d}\s*)\[([^\[\]]+)\]$"))?,
            suffix: compile(format!(r"^\{{([^{{}}]+)\}}\s*{d}\s*\{{([^{{}}]+)\}}$"))?,
            // exactly one separator between two sides, trailing separators tolerated
            mapping: compile(format!(r"^([^{d}]+){d}([^{d}]+){d}*$"))?,
        })
    }
}

pub fn validate_delimiter(delimiter: char) -> Result<char, LoadError> {
    if delimiter == '\n' || delimiter == '\r' {
        return Err(LoadError::InvalidDelimiter(delimiter));
    }
    Ok(delimiter)
}

impl PlainTextSource {
    pub fn open(path: &Path, delimiter: char, log: DiagnosticsLog) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        tracing::info!("Reading plain-text dictionary: {}", path.display());
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = match decode(bytes) {
            Ok(text) => text,
            Err(text) => {
                log.note(format!("Input file {name} is not valid UTF-8; reading it as Latin-1"));
                text
            }
        };

        Self::from_text(name, &text, delimiter, log)
    }

    pub fn from_text(
        name: impl Into<String>,
        text: &str,
        delimiter: char,
        log: DiagnosticsLog,
    ) -> Result<Self, LoadError> {
        let delimiter = validate_delimiter(delimiter)?;
        let mut source = Self {
            name: name.into(),
            lines: text.lines().map(str::to_string).collect(),
            cursor: 0,
            delimiter,
            patterns: Patterns::new(delimiter)?,
            read_any: false,
            found_first_mapping: false,
            log,
        };
        source.skip_blank();
        Ok(source)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn current(&self) -> Option<&str> {
        self.lines.get(self.cursor).map(|l| l.trim_end())
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.read_any = true;
        self.skip_blank();
    }

    fn skip_blank(&mut self) {
        while self
            .lines
            .get(self.cursor)
            .is_some_and(|l| l.trim().is_empty())
        {
            self.cursor += 1;
        }
    }

    fn change_delimiter(&mut self, delimiter: char) -> bool {
        match validate_delimiter(delimiter).and_then(Patterns::new) {
            Ok(patterns) => {
                self.delimiter = delimiter;
                self.patterns = patterns;
                true
            }
            Err(e) => {
                self.log.warning(format!(
                    "Input file {}, line {}: {e}; keeping `{}'",
                    self.name,
                    self.current_row(),
                    self.delimiter
                ));
                false
            }
        }
    }
}

impl DictionarySource for PlainTextSource {
    fn format_name(&self) -> &str {
        "Tehthu"
    }

    fn next_config_line(&mut self) -> Option<ConfigLine> {
        if self.found_first_mapping {
            return None;
        }
        let line = self.current()?.to_string();

        if !self.read_any {
            if let Some(caps) = self.patterns.names.captures(&line) {
                let config = ConfigLine::LanguageNames {
                    left: caps[1].trim().to_string(),
                    right: caps[2].trim().to_string(),
                };
                self.advance();
                return Some(config);
            }
        }

        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if !c.is_whitespace() {
                // only the patterns change; nothing read so far is re-read
                self.change_delimiter(c);
                self.advance();
                return Some(ConfigLine::Delimiter(self.delimiter));
            }
        }

        if let Some(caps) = self.patterns.suffix.captures(&line) {
            let config = ConfigLine::SuffixMapping {
                left: caps[1].to_string(),
                right: caps[2].to_string(),
            };
            self.advance();
            return Some(config);
        }

        None
    }

    fn next_mapping(&mut self) -> Option<Mapping> {
        let row = self.current_row();
        let line = self.current()?.to_string();
        self.found_first_mapping = true;
        self.advance();

        let Some(caps) = self.patterns.mapping.captures(&line) else {
            self.log.warning(format!(
                "Input file {}, line {row}: does not contain exactly one separator character `{}'. Skipping line.",
                self.name, self.delimiter
            ));
            return None;
        };

        let left = caps[1].trim();
        let right = caps[2].trim();
        if left.is_empty() || right.is_empty() {
            self.log.warning(format!(
                "Input file {}, line {row}: one side of the mapping is blank. Skipping line.",
                self.name
            ));
            return None;
        }

        Some(Mapping {
            left: left.to_string(),
            right: right.to_string(),
            row,
        })
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    fn current_row(&self) -> usize {
        self.cursor + 1
    }
}

/// UTF-8 (BOM stripped) if possible, otherwise Latin-1 as `Err`
fn decode(bytes: Vec<u8>) -> Result<String, String> {
    let bytes = match bytes.strip_prefix(b"\xEF\xBB\xBF") {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    String::from_utf8(bytes).map_err(|e| e.into_bytes().into_iter().map(char::from).collect())
}
