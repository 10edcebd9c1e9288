//! Downloading and parsing the remote localisation sheet.

/// HTTP download of the published CSV export.
pub mod fetch;
/// CSV parsing and key normalisation.
pub mod parse;

pub use fetch::SheetFetcher;
pub use parse::{normalize_key, CsvDocument, CsvRow};
