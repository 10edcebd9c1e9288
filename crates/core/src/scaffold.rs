//! Project folder scaffolding and legacy scenes migration.
//!
//! Creates the canonical project layout under a base directory and folds an
//! old top-level scenes directory into the project root. Every step is
//! idempotent: folders that already exist are counted, never errors.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::ScaffoldSettings;

/// What happened to the legacy scenes directory during a scaffold run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScenesMigration {
    /// No legacy directory found; the target directory was ensured.
    #[default]
    LegacyAbsent,
    /// The legacy directory was renamed into the project root wholesale.
    MovedDirectory,
    /// Both directories existed; top-level files were moved one by one.
    MergedFiles {
        /// Files moved into the target directory.
        moved: usize,
        /// Whether the emptied legacy directory was deleted.
        legacy_removed: bool,
    },
}

/// Outcome of a scaffold run.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// Folders created by this run, in creation order.
    pub created: Vec<std::path::PathBuf>,
    /// Folders that already existed.
    pub existing: usize,
    /// Legacy scenes handling outcome.
    pub migration: ScenesMigration,
}

impl ScaffoldReport {
    /// One-line human summary, e.g. for a status bar.
    pub fn summary(&self) -> String {
        let migration = match &self.migration {
            ScenesMigration::LegacyAbsent => String::new(),
            ScenesMigration::MovedDirectory => "; moved legacy scenes directory".to_string(),
            ScenesMigration::MergedFiles { moved, .. } => {
                format!("; merged {moved} legacy scene files")
            }
        };
        format!(
            "{} folders created, {} already present{}",
            self.created.len(),
            self.existing,
            migration
        )
    }
}

/// Create the configured folder layout and migrate the legacy scenes
/// directory.
pub fn apply(settings: &ScaffoldSettings) -> Result<ScaffoldReport> {
    let root = settings.base_dir.join(&settings.root);
    let mut report = ScaffoldReport::default();

    ensure_dir(&root, &mut report)?;
    for folder in &settings.folders {
        ensure_dir(&root.join(folder), &mut report)?;
    }
    migrate_scenes(
        &settings.base_dir,
        &root,
        &settings.legacy_scenes,
        &mut report,
    )?;

    info!(
        created = report.created.len(),
        existing = report.existing,
        "project scaffold complete"
    );
    Ok(report)
}

fn ensure_dir(path: &Path, report: &mut ScaffoldReport) -> Result<()> {
    if path.is_dir() {
        report.existing += 1;
        return Ok(());
    }
    fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))?;
    debug!(path = %path.display(), "created folder");
    report.created.push(path.to_path_buf());
    Ok(())
}

fn migrate_scenes(
    base: &Path,
    root: &Path,
    legacy_name: &str,
    report: &mut ScaffoldReport,
) -> Result<()> {
    let legacy = base.join(legacy_name);
    let target = root.join(legacy_name);

    if !legacy.is_dir() {
        ensure_dir(&target, report)?;
        report.migration = ScenesMigration::LegacyAbsent;
        return Ok(());
    }

    if !target.is_dir() {
        fs::rename(&legacy, &target).with_context(|| {
            format!(
                "failed to move {} to {}",
                legacy.display(),
                target.display()
            )
        })?;
        info!(from = %legacy.display(), to = %target.display(), "moved legacy scenes directory");
        report.migration = ScenesMigration::MovedDirectory;
        return Ok(());
    }

    // Both exist: move top-level files across, leave nested directories and
    // name collisions where they are.
    let mut moved = 0usize;
    let entries =
        fs::read_dir(&legacy).with_context(|| format!("failed to read {}", legacy.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let destination = target.join(entry.file_name());
        if destination.exists() {
            warn!(file = %destination.display(), "destination exists, leaving legacy copy in place");
            continue;
        }
        fs::rename(entry.path(), &destination)
            .with_context(|| format!("failed to move {}", entry.path().display()))?;
        moved += 1;
    }

    let legacy_removed = fs::read_dir(&legacy)?.next().is_none();
    if legacy_removed {
        fs::remove_dir(&legacy)
            .with_context(|| format!("failed to remove {}", legacy.display()))?;
    }
    info!(moved, target = %target.display(), "merged legacy scene files");
    report.migration = ScenesMigration::MergedFiles {
        moved,
        legacy_removed,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_for(base: &Path) -> ScaffoldSettings {
        ScaffoldSettings {
            base_dir: base.to_path_buf(),
            ..ScaffoldSettings::default()
        }
    }

    #[test]
    fn creates_the_full_layout_on_an_empty_base() -> Result<()> {
        let dir = tempdir()?;
        let settings = settings_for(dir.path());

        let report = apply(&settings)?;
        // Root + ten folders + the scenes target.
        assert_eq!(report.created.len(), 12);
        assert_eq!(report.existing, 0);
        assert_eq!(report.migration, ScenesMigration::LegacyAbsent);
        assert!(dir.path().join("_Project/Scripts/UI/UIManager").is_dir());
        assert!(dir.path().join("_Project/Scenes").is_dir());
        Ok(())
    }

    #[test]
    fn second_run_changes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let settings = settings_for(dir.path());

        apply(&settings)?;
        let report = apply(&settings)?;
        assert!(report.created.is_empty());
        assert_eq!(report.existing, 12);
        Ok(())
    }

    #[test]
    fn legacy_directory_is_renamed_when_target_is_missing() -> Result<()> {
        let dir = tempdir()?;
        let legacy = dir.path().join("Scenes");
        fs::create_dir_all(&legacy)?;
        fs::write(legacy.join("main.unity"), "scene")?;

        let report = apply(&settings_for(dir.path()))?;
        assert_eq!(report.migration, ScenesMigration::MovedDirectory);
        assert!(!legacy.exists());
        assert!(dir.path().join("_Project/Scenes/main.unity").is_file());
        Ok(())
    }

    #[test]
    fn scene_files_are_merged_when_both_directories_exist() -> Result<()> {
        let dir = tempdir()?;
        let legacy = dir.path().join("Scenes");
        let target = dir.path().join("_Project/Scenes");
        fs::create_dir_all(&legacy)?;
        fs::create_dir_all(&target)?;
        fs::write(legacy.join("a.unity"), "a")?;
        fs::write(legacy.join("b.unity"), "b")?;
        fs::write(target.join("c.unity"), "c")?;

        let report = apply(&settings_for(dir.path()))?;
        assert_eq!(
            report.migration,
            ScenesMigration::MergedFiles {
                moved: 2,
                legacy_removed: true,
            }
        );
        assert!(!legacy.exists());
        assert!(target.join("a.unity").is_file());
        assert!(target.join("c.unity").is_file());
        Ok(())
    }

    #[test]
    fn name_collisions_keep_the_legacy_copy() -> Result<()> {
        let dir = tempdir()?;
        let legacy = dir.path().join("Scenes");
        let target = dir.path().join("_Project/Scenes");
        fs::create_dir_all(&legacy)?;
        fs::create_dir_all(&target)?;
        fs::write(legacy.join("main.unity"), "old")?;
        fs::write(target.join("main.unity"), "new")?;

        let report = apply(&settings_for(dir.path()))?;
        assert_eq!(
            report.migration,
            ScenesMigration::MergedFiles {
                moved: 0,
                legacy_removed: false,
            }
        );
        assert!(legacy.join("main.unity").is_file());
        assert_eq!(fs::read_to_string(target.join("main.unity"))?, "new");
        Ok(())
    }

    #[test]
    fn nested_directories_are_not_moved() -> Result<()> {
        let dir = tempdir()?;
        let legacy = dir.path().join("Scenes");
        let target = dir.path().join("_Project/Scenes");
        fs::create_dir_all(legacy.join("backups"))?;
        fs::create_dir_all(&target)?;
        fs::write(legacy.join("main.unity"), "scene")?;

        let report = apply(&settings_for(dir.path()))?;
        assert_eq!(
            report.migration,
            ScenesMigration::MergedFiles {
                moved: 1,
                legacy_removed: false,
            }
        );
        assert!(legacy.join("backups").is_dir());
        assert!(target.join("main.unity").is_file());
        Ok(())
    }
}
