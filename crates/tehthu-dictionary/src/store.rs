use std::path::{Path, PathBuf};

use tehthu_config::dictionary::DictionaryConfig;
use tehthu_core::dictionary::{ConfigLine, DictionarySource, LoadError, Mapping};
use tehthu_core::{DiagnosticsLog, Direction, LanguageNames};

use crate::loaders::{self, plain_text::validate_delimiter};
use crate::types::{BuildReport, MappingTable, SuffixTable, Tables};

/// Parsed dictionary file plus the settings used to parse it
#[derive(Debug)]
pub struct DictionaryStore {
    path: PathBuf,
    delimiter: char,
    default_names: LanguageNames,
    names: LanguageNames,
    tables: Tables,
    report: BuildReport,
    log: DiagnosticsLog,
}

impl DictionaryStore {
    /// Open and parse `path`.
    ///
    /// A missing file fails construction; parse problems inside the file are
    /// reported through `log`.
    pub fn open(
        path: impl Into<PathBuf>,
        config: &DictionaryConfig,
        log: DiagnosticsLog,
    ) -> Result<Self, LoadError> {
        let path = path.into();
        if !path.exists() {
            return Err(LoadError::FileNotFound(path));
        }

        let mut store = Self::empty(path, config, log)?;
        store.reparse()?;
        Ok(store)
    }

    /// Store bound to `path` that has not been parsed yet
    pub fn empty(
        path: impl Into<PathBuf>,
        config: &DictionaryConfig,
        log: DiagnosticsLog,
    ) -> Result<Self, LoadError> {
        let names = LanguageNames::new(&config.left_name, &config.right_name);
        Ok(Self {
            path: path.into(),
            delimiter: validate_delimiter(config.delimiter)?,
            default_names: names.clone(),
            names,
            tables: Tables::default(),
            report: BuildReport::default(),
            log,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn names(&self) -> &LanguageNames {
        &self.names
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn mappings(&self, direction: Direction) -> &MappingTable {
        self.tables.mappings(direction)
    }

    pub fn suffixes(&self, direction: Direction) -> &SuffixTable {
        self.tables.suffixes(direction)
    }

    pub fn last_report(&self) -> &BuildReport {
        &self.report
    }

    pub fn log(&self) -> &DiagnosticsLog {
        &self.log
    }

    /// Translation candidates of `word` in `direction`, dictionary order
    pub fn lookup(&self, word: &str, direction: Direction) -> Option<&[String]> {
        self.tables.mappings(direction).get(word)
    }

    /// Switch to another file. A missing file is refused and the current
    /// tables stay loaded.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) -> Result<BuildReport, LoadError> {
        let path = path.into();
        if !path.exists() {
            return Err(LoadError::FileNotFound(path));
        }

        self.path = path;
        self.reparse()
    }

    pub fn set_delimiter(&mut self, delimiter: char) -> Result<BuildReport, LoadError> {
        self.delimiter = validate_delimiter(delimiter)?;
        self.reparse()
    }

    /// Rename both languages; a name row in the file still wins on the next parse
    pub fn set_language_names(&mut self, left: impl Into<String>, right: impl Into<String>) {
        self.default_names = LanguageNames::new(left, right);
        self.names = self.default_names.clone();
    }

    /// Throw away the current tables and parse the file again
    pub fn reparse(&mut self) -> Result<BuildReport, LoadError> {
        self.tables = Tables::default();
        self.names = self.default_names.clone();
        self.report = BuildReport::default();

        let mut source = match loaders::open_source(&self.path, self.delimiter, self.log.clone()) {
            Ok(source) => source,
            Err(e) => {
                self.log
                    .critical(format!("Could not parse {}: {e}", self.path.display()));
                return Err(e);
            }
        };

        Ok(self.build(source.as_mut()))
    }

    /// Read every row of `source` into a fresh table set and swap it in
    pub fn build(&mut self, source: &mut dyn DictionarySource) -> BuildReport {
        let file = self.file_label();
        let format = source.format_name().to_string();
        self.log
            .info(format!("Parsing {format} file {file} started"));

        let mut builder = Builder {
            tables: Tables::default(),
            names: self.default_names.clone(),
            report: BuildReport {
                format: format.clone(),
                ..BuildReport::default()
            },
            file: &file,
            log: &self.log,
        };

        let mut row = source.current_row();
        while let Some(line) = source.next_config_line() {
            builder.config_line(line, row);
            row = source.current_row();
        }

        while !source.at_end() {
            match source.next_mapping() {
                Some(mapping) => builder.mapping(mapping),
                None => builder.report.skipped += 1,
            }
        }

        let Builder {
            tables,
            names,
            report,
            ..
        } = builder;

        self.log.info(format!(
            "Parsing {format} file {file} complete: {} mappings, {} suffix rules, {} ambiguous, {} skipped",
            report.mappings, report.suffix_rules, report.ambiguous, report.skipped
        ));

        self.tables = tables;
        self.names = names;
        self.report = report.clone();
        report
    }

    /// Register `{left}` ↔ `{right}` word endings in both directions
    pub fn add_suffix_mapping(&mut self, left: &str, right: &str) {
        let location = format!("Suffix mapping in {}", self.file_label());
        insert_suffix(&mut self.tables, &self.names, left, right, &location, &self.log);
    }

    fn file_label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

struct Builder<'a> {
    tables: Tables,
    names: LanguageNames,
    report: BuildReport,
    file: &'a str,
    log: &'a DiagnosticsLog,
}

impl Builder<'_> {
    fn config_line(&mut self, line: ConfigLine, row: usize) {
        match line {
            ConfigLine::LanguageNames { left, right } => {
                tracing::debug!("Language names: {left} / {right}");
                self.names = LanguageNames::new(left, right);
            }
            ConfigLine::Delimiter(delimiter) => {
                self.log.note(format!(
                    "Input file {}, line {row}: delimiter is now `{delimiter}'",
                    self.file
                ));
            }
            ConfigLine::SuffixMapping { left, right } => {
                let location = format!("Input file {}, line {row}", self.file);
                if insert_suffix(&mut self.tables, &self.names, &left, &right, &location, self.log)
                {
                    self.report.ambiguous += 1;
                }
                self.report.suffix_rules += 1;
            }
        }
    }

    fn mapping(&mut self, mapping: Mapping) {
        let location = format!("Input file {}, line {}", self.file, mapping.row);
        let forward = self
            .tables
            .left_to_right
            .insert(&mapping.left, &mapping.right)
            .map(|all| report_ambiguity(self.log, &location, &self.names.left, &mapping.left, all));
        // a one-sided row has nothing to look up in reverse
        let backward = if mapping.right.is_empty() {
            None
        } else {
            self.tables
                .right_to_left
                .insert(&mapping.right, &mapping.left)
                .map(|all| report_ambiguity(self.log, &location, &self.names.right, &mapping.right, all))
        };

        if forward.is_some() || backward.is_some() {
            self.report.ambiguous += 1;
        }
        self.report.mappings += 1;
    }
}

/// Returns whether either direction became ambiguous
fn insert_suffix(
    tables: &mut Tables,
    names: &LanguageNames,
    left: &str,
    right: &str,
    location: &str,
    log: &DiagnosticsLog,
) -> bool {
    let forward = tables
        .left_suffixes
        .insert(left, right)
        .map(|all| report_ambiguity(log, location, &names.left, &format!("-{left}"), all));
    let backward = tables
        .right_suffixes
        .insert(right, left)
        .map(|all| report_ambiguity(log, location, &names.right, &format!("-{right}"), all));

    forward.is_some() || backward.is_some()
}

fn report_ambiguity(
    log: &DiagnosticsLog,
    location: &str,
    language: &str,
    key: &str,
    candidates: &[String],
) {
    log.note(format!(
        "{location}: {language} \"{key}\" now has {} translations: {}",
        candidates.len(),
        candidates.join(", ")
    ));
}
