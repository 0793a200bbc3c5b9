use std::path::Path;

use tehthu_core::dictionary::{DictionarySource, LoadError};
use tehthu_core::DiagnosticsLog;

pub mod plain_text;
pub mod spreadsheet;

pub use plain_text::PlainTextSource;
pub use spreadsheet::SpreadsheetSource;

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["ods", "xlsx", "xlsm", "xls"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    Spreadsheet,
}

impl SourceFormat {
    /// Spreadsheet extensions select a workbook reader, anything else is plain text
    pub fn detect(path: &Path) -> Self {
        let is_sheet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_sheet { Self::Spreadsheet } else { Self::PlainText }
    }
}

pub fn open_source(
    path: &Path,
    delimiter: char,
    log: DiagnosticsLog,
) -> Result<Box<dyn DictionarySource>, LoadError> {
    let format = SourceFormat::detect(path);
    tracing::info!("Loading {:?} dictionary from {}", format, path.display());

    Ok(match format {
        SourceFormat::PlainText => Box::new(PlainTextSource::open(path, delimiter, log)?),
        SourceFormat::Spreadsheet => Box::new(SpreadsheetSource::open(path, log)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(SourceFormat::detect(Path::new("words.teh")), SourceFormat::PlainText);
        assert_eq!(SourceFormat::detect(Path::new("words")), SourceFormat::PlainText);
        assert_eq!(SourceFormat::detect(Path::new("a/words.ODS")), SourceFormat::Spreadsheet);
        assert_eq!(SourceFormat::detect(Path::new("words.xlsx")), SourceFormat::Spreadsheet);
        assert_eq!(SourceFormat::detect(Path::new("words.xls")), SourceFormat::Spreadsheet);
    }

    #[test]
    fn test_open_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.teh");
        std::fs::write(&path, "hello|hola\n").unwrap();

        let mut source = open_source(&path, '|', DiagnosticsLog::silent(8)).unwrap();
        assert_eq!(source.format_name(), "Tehthu");
        assert_eq!(source.next_mapping().map(|m| m.right), Some("hola".to_string()));
    }
}
