pub mod case;
pub mod diagnostics;
pub mod dictionary;
pub mod language;
pub mod preprocess;
pub mod tokenize;
pub mod types;

pub use case::CaseType;
pub use diagnostics::DiagnosticsLog;
pub use dictionary::{ConfigLine, DictionarySource, LoadError, Mapping};
pub use language::{Direction, LanguageNames};
