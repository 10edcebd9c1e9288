//! JSON-file persistence for translation tables.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::PersistError,
    table::{LocaleValues, TranslationTable},
};

/// Serialised form of a table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDocument {
    name: String,
    #[serde(default)]
    entries: BTreeMap<String, LocaleValues>,
    updated_at: DateTime<Utc>,
}

impl TableDocument {
    fn empty(path: &Path) -> Self {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("table")
            .to_string();
        Self {
            name,
            entries: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Translation table persisted as a single pretty-printed JSON file.
///
/// Mutations stay in memory until [`TranslationTable::commit`] rewrites the
/// whole file, so a failed run never leaves a half-written document behind.
#[derive(Debug)]
pub struct JsonTableStore {
    path: PathBuf,
    document: TableDocument,
}

impl JsonTableStore {
    /// Open the table at `path`, starting empty when the file does not exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "table file missing, starting empty");
            return Ok(Self {
                document: TableDocument::empty(&path),
                path,
            });
        }

        let contents = fs::read_to_string(&path)?;
        let document = serde_json::from_str(&contents)?;
        Ok(Self { path, document })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name of the table, taken from the file stem for new tables.
    pub fn name(&self) -> &str {
        &self.document.name
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.document.entries.len()
    }

    /// True when the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.document.entries.is_empty()
    }
}

impl TranslationTable for JsonTableStore {
    fn keys(&self) -> Vec<String> {
        self.document.entries.keys().cloned().collect()
    }

    fn entry(&self, key: &str) -> Option<&LocaleValues> {
        self.document.entries.get(key)
    }

    fn upsert(&mut self, key: &str, values: LocaleValues) {
        self.document.entries.insert(key.to_string(), values);
    }

    fn remove(&mut self, key: &str) -> Option<LocaleValues> {
        self.document.entries.remove(key)
    }

    fn commit(&mut self) -> Result<(), PersistError> {
        self.document.updated_at = Utc::now();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialised = serde_json::to_vec_pretty(&self.document)?;
        fs::write(&self.path, serialised)?;
        debug!(
            path = %self.path.display(),
            keys = self.document.entries.len(),
            "table committed"
        );
        Ok(())
    }
}
