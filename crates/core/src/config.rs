//! Application configuration.
//!
//! Settings live in a TOML file under the user's config directory and can
//! be overridden per-run through `LOCSYNC_*` environment variables, e.g.
//! `LOCSYNC_SYNC__SHEET_URL`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory name under the platform config/data roots.
pub const APP_DIR: &str = "locsync";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sheet synchronisation settings.
    pub sync: SyncSettings,
    /// Project scaffolding settings.
    pub scaffold: ScaffoldSettings,
}

/// Where the sheet lives and where the table is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// URL of the published CSV export.
    pub sheet_url: String,
    /// Path of the JSON table file the sync writes to.
    pub table_path: PathBuf,
    /// Deadline for the whole download, in seconds.
    pub timeout_secs: u64,
}

/// Folder layout created by the project scaffolder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSettings {
    /// Directory the layout is created under.
    pub base_dir: PathBuf,
    /// Name of the top-level project folder inside `base_dir`.
    pub root: String,
    /// Folders created inside the root, relative paths.
    pub folders: Vec<String>,
    /// Name of the legacy scenes directory directly under `base_dir`.
    pub legacy_scenes: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sync: SyncSettings::default(),
            scaffold: ScaffoldSettings::default(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            sheet_url: "https://docs.google.com/spreadsheets/d/SHEET_ID/export?format=csv"
                .to_string(),
            table_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("strings.json"),
            timeout_secs: 30,
        }
    }
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            root: "_Project".to_string(),
            folders: [
                "Material",
                "Prefab",
                "Prefab/UI",
                "Scripts",
                "Scripts/UI",
                "Scripts/UI/UIManager",
                "Scripts/SaveGame",
                "Scripts/ScriptableObject",
                "ScriptableObject",
                "Sprites",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            legacy_scenes: "Scenes".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location plus environment
    /// overrides. Missing file or keys fall back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from an explicit file path plus environment
    /// overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("LOCSYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;
        let config = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        Ok(config)
    }

    /// Write this configuration to the default file location.
    pub fn save(&self) -> Result<()> {
        self.save_to(config_path())
    }

    /// Write this configuration to an explicit file path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialised = toml::to_string_pretty(self).context("failed to serialise configuration")?;
        fs::write(path, serialised).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Default configuration file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a default configuration file if none exists yet, returning its
/// path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_if_missing(&path)?;
    Ok(path)
}

fn write_default_if_missing(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    AppConfig::default().save_to(path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
