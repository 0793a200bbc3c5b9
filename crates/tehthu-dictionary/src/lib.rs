pub mod loaders;
pub mod store;
pub mod types;

pub use loaders::{PlainTextSource, SourceFormat, SpreadsheetSource, open_source};
pub use store::DictionaryStore;
pub use types::{BuildReport, MappingTable, SuffixTable, Tables};
