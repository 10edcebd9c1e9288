//! Translation table storage.

/// JSON-file-backed table store.
pub mod json;

pub use json::JsonTableStore;

use std::collections::BTreeMap;

use crate::error::PersistError;

/// Per-key translations, keyed by locale name.
pub type LocaleValues = BTreeMap<String, String>;

/// Storage backend for a localisation table.
///
/// Mutations accumulate in memory; nothing reaches durable storage until
/// [`TranslationTable::commit`] is called. Callers that need to back out a
/// half-applied batch can read prior rows through
/// [`TranslationTable::entry`] before overwriting them.
pub trait TranslationTable {
    /// Keys currently present in the table.
    fn keys(&self) -> Vec<String>;

    /// The stored row for `key`, if present.
    fn entry(&self, key: &str) -> Option<&LocaleValues>;

    /// Insert or replace the row for `key`.
    fn upsert(&mut self, key: &str, values: LocaleValues);

    /// Remove the row for `key`, returning the previous values when the
    /// key existed.
    fn remove(&mut self, key: &str) -> Option<LocaleValues>;

    /// Flush pending changes to durable storage.
    fn commit(&mut self) -> Result<(), PersistError>;
}
