use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tehthu_core::dictionary::{
    ConfigLine, DictionarySource, LoadError, Mapping, name_stanza, suffix_stanza,
};
use tehthu_core::DiagnosticsLog;

const PREFERRED_SHEETS: [&str; 2] = ["Dictionary", "Sheet1"];

/// Two-column dictionary read out of a workbook sheet
pub struct SpreadsheetSource {
    name: String,
    sheet: String,
    rows: Vec<Vec<String>>,
    first_row: usize,
    cursor: usize,
    read_any: bool,
    found_first_mapping: bool,
    log: DiagnosticsLog,
}

impl SpreadsheetSource {
    pub fn open(path: &Path, log: DiagnosticsLog) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|e| LoadError::Spreadsheet(e.to_string()))?;
        let sheet = pick_sheet(&workbook.sheet_names())
            .ok_or_else(|| LoadError::NoUsableSheet(path.to_path_buf()))?;
        tracing::info!("Reading sheet \"{}\" of {}", sheet, path.display());

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| LoadError::Spreadsheet(e.to_string()))?;
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut source = Self::from_rows(name, sheet, rows, log);
        source.first_row = first_row;
        Ok(source)
    }

    /// Source over already-extracted cell text, row 1 first
    pub fn from_rows(
        name: impl Into<String>,
        sheet: impl Into<String>,
        rows: Vec<Vec<String>>,
        log: DiagnosticsLog,
    ) -> Self {
        let rows = rows.into_iter().map(trim_row).collect();
        let mut source = Self {
            name: name.into(),
            sheet: sheet.into(),
            rows,
            first_row: 0,
            cursor: 0,
            read_any: false,
            found_first_mapping: false,
            log,
        };
        source.skip_empty();
        source
    }

    fn current(&self) -> Option<&[String]> {
        self.rows.get(self.cursor).map(Vec::as_slice)
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.read_any = true;
        self.skip_empty();
    }

    fn skip_empty(&mut self) {
        while self.rows.get(self.cursor).is_some_and(Vec::is_empty) {
            self.cursor += 1;
        }
    }
}

impl DictionarySource for SpreadsheetSource {
    fn format_name(&self) -> &str {
        "Spreadsheet"
    }

    fn next_config_line(&mut self) -> Option<ConfigLine> {
        if self.found_first_mapping {
            return None;
        }
        let row = self.current()?;
        let (left, right) = match row {
            [left, right, ..] => (left.as_str(), right.as_str()),
            _ => return None,
        };

        let config = if !self.read_any {
            name_stanza(left, right).map(|(left, right)| ConfigLine::LanguageNames { left, right })
        } else {
            None
        };
        let config = config.or_else(|| {
            suffix_stanza(left, right).map(|(left, right)| ConfigLine::SuffixMapping { left, right })
        })?;

        self.advance();
        Some(config)
    }

    fn next_mapping(&mut self) -> Option<Mapping> {
        let row = self.current_row();
        let cells = self.current()?.to_vec();
        self.found_first_mapping = true;
        self.advance();

        let left = cells.first().map(|c| c.trim()).unwrap_or_default();
        let right = cells.get(1).map(|c| c.trim()).unwrap_or_default();
        if left.is_empty() {
            self.log.warning(format!(
                "Input file {}, sheet {}, row {row}: first column is empty. Skipping row.",
                self.name, self.sheet
            ));
            return None;
        }
        if right.is_empty() {
            self.log.warning(format!(
                "Input file {}, sheet {}, row {row}: only one populated column. `{left}' translates to nothing.",
                self.name, self.sheet
            ));
        }

        Some(Mapping {
            left: left.to_string(),
            right: right.to_string(),
            row,
        })
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.rows.len()
    }

    fn current_row(&self) -> usize {
        self.first_row + self.cursor + 1
    }
}

/// "Dictionary", else "Sheet1", else whatever comes first
pub fn pick_sheet(names: &[String]) -> Option<String> {
    PREFERRED_SHEETS
        .iter()
        .find_map(|wanted| names.iter().find(|n| n.as_str() == *wanted))
        .or_else(|| names.first())
        .cloned()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Drop trailing empty cells so a row's length is its populated column count
fn trim_row(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|c| c.trim().is_empty()) {
        row.pop();
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn source(data: &[&[&str]]) -> (SpreadsheetSource, DiagnosticsLog) {
        let log = DiagnosticsLog::silent(32);
        log.attach();
        let src = SpreadsheetSource::from_rows("words.ods", "Dictionary", rows(data), log.clone());
        (src, log)
    }

    #[test]
    fn test_pick_sheet() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            pick_sheet(&names(&["Notes", "Sheet1", "Dictionary"])),
            Some("Dictionary".into())
        );
        assert_eq!(pick_sheet(&names(&["Notes", "Sheet1"])), Some("Sheet1".into()));
        assert_eq!(pick_sheet(&names(&["Notes", "Other"])), Some("Notes".into()));
        assert_eq!(pick_sheet(&[]), None);
    }

    #[test]
    fn test_names_and_suffix_rows() {
        let (mut src, _) = source(&[
            &["[English]", "[Spanish]"],
            &["{ning}", "{iendo}"],
            &["run", "correr", "ignored"],
        ]);

        assert_eq!(
            src.next_config_line(),
            Some(ConfigLine::LanguageNames {
                left: "English".into(),
                right: "Spanish".into()
            })
        );
        assert_eq!(
            src.next_config_line(),
            Some(ConfigLine::SuffixMapping {
                left: "ning".into(),
                right: "iendo".into()
            })
        );
        assert_eq!(src.next_config_line(), None);

        let m = src.next_mapping().unwrap();
        assert_eq!((m.left.as_str(), m.right.as_str(), m.row), ("run", "correr", 3));
        assert!(src.at_end());
    }

    #[test]
    fn test_empty_rows_skipped_and_single_column_reported() {
        let (mut src, log) = source(&[&["", ""], &["cat", "gato"], &[], &["lonely", ""]]);
        assert_eq!(src.current_row(), 2);
        assert_eq!(src.next_mapping().map(|m| m.right), Some("gato".to_string()));
        assert_eq!(src.current_row(), 4);

        let lonely = src.next_mapping().unwrap();
        assert_eq!((lonely.left.as_str(), lonely.right.as_str(), lonely.row), ("lonely", "", 4));
        assert!(src.at_end());

        let line = log.try_pop().unwrap();
        assert!(line.contains("row 4"), "{line}");
        assert!(log.try_pop().is_none());
    }

    #[test]
    fn test_row_without_first_column_is_skipped() {
        let (mut src, log) = source(&[&["", "gato"], &["dog", "perro"]]);
        assert_eq!(src.next_mapping(), None);
        assert_eq!(src.next_mapping().map(|m| m.left), Some("dog".to_string()));

        let line = log.try_pop().unwrap();
        assert!(line.contains("row 1"), "{line}");
    }

    #[test]
    fn test_names_only_in_first_row() {
        let (mut src, _) = source(&[&["hello", "hola"], &["[A]", "[B]"]]);
        assert_eq!(src.next_config_line(), None);
        src.next_mapping();
        assert_eq!(src.next_config_line(), None);
        let m = src.next_mapping().unwrap();
        assert_eq!(m.left, "[A]");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("hola".into())), "hola");
        assert_eq!(cell_text(&Data::Int(42)), "42");
    }

    #[test]
    fn test_open_prefers_dictionary_sheet() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/words.xlsx");
        let mut src = SpreadsheetSource::open(&path, DiagnosticsLog::silent(8)).unwrap();

        // "Notes" comes first in the workbook
        assert_eq!(
            src.next_config_line(),
            Some(ConfigLine::LanguageNames {
                left: "English".into(),
                right: "Spanish".into()
            })
        );
        assert!(matches!(src.next_config_line(), Some(ConfigLine::SuffixMapping { .. })));
        let m = src.next_mapping().unwrap();
        assert_eq!((m.left.as_str(), m.right.as_str(), m.row), ("hello", "hola", 3));
    }

    #[test]
    fn test_open_corrupt_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        assert!(matches!(
            SpreadsheetSource::open(&path, DiagnosticsLog::silent(8)),
            Err(LoadError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let log = DiagnosticsLog::silent(8);
        assert!(matches!(
            SpreadsheetSource::open(Path::new("/no/such/book.ods"), log),
            Err(LoadError::FileNotFound(_))
        ));
    }
}
