#![warn(clippy::all, missing_docs)]

//! Core domain logic for locsync.
//!
//! This crate hosts the sheet download and parsing pipeline, the
//! translation table storage layer, the reconciliation engine, and the
//! project scaffolder used by the terminal UI and any future frontends.

pub mod config;
pub mod error;
pub mod scaffold;
pub mod sheet;
pub mod sync;
pub mod table;

pub use config::AppConfig;
pub use error::{PersistError, SyncError};
pub use sheet::{CsvDocument, CsvRow, SheetFetcher};
pub use sync::{SyncEvent, SyncReport, TableSync};
pub use table::{JsonTableStore, LocaleValues, TranslationTable};
