//! Reconciliation of a translation table against the remote sheet.
//!
//! A sync run is fetch → parse → stage → apply → commit. Staging is pure:
//! it compares the parsed sheet with a snapshot of the table's keys and
//! produces a [`SyncPlan`] of upserts and removals. Application records an
//! undo log so a failed commit can put the in-memory table back exactly as
//! it was.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::SyncError,
    sheet::{
        fetch::SheetFetcher,
        parse::{self, normalize_key, CsvDocument, CsvRow},
    },
    table::{LocaleValues, TranslationTable},
};

/// Events emitted by a background sync run.
#[derive(Debug)]
pub enum SyncEvent {
    /// Sync succeeded.
    Success {
        /// Outcome counters for the finished run.
        report: SyncReport,
    },
    /// Sync failed; the table was left as it was before the run.
    Error(SyncError),
}

/// Outcome of a completed sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Keys inserted that were not in the table before.
    pub added: usize,
    /// Keys whose values were overwritten.
    pub updated: usize,
    /// Keys present in both sheet and table with identical values.
    pub unchanged: usize,
    /// Table keys removed because the sheet no longer lists them.
    pub removed_keys: Vec<String>,
    /// Sheet rows ignored during parsing (empty keys, bad records).
    pub skipped: usize,
    /// Keys in the table after the run.
    pub table_len: usize,
    /// Wall-clock time the run took.
    pub duration: Duration,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// One-line human summary, e.g. for a status bar.
    pub fn summary(&self) -> String {
        format!(
            "{} added, {} updated, {} removed, {} unchanged ({} keys, {:.1}s)",
            self.added,
            self.updated,
            self.removed_keys.len(),
            self.unchanged,
            self.table_len,
            self.duration.as_secs_f64()
        )
    }
}

/// Staged changes for one sync run.
///
/// Upserts keep the sheet's own key spelling; removals name exact table
/// keys. The two sets never overlap because removal candidates are, by
/// construction, absent from the sheet.
#[derive(Debug, Default)]
pub struct SyncPlan {
    /// Rows to insert or overwrite, in sheet order.
    pub upserts: Vec<CsvRow>,
    /// Exact table keys to delete.
    pub removals: Vec<String>,
}

/// Compare a table key snapshot with a parsed sheet and plan the changes.
///
/// Key comparison is case-insensitive on both sides. When the sheet lists
/// the same key twice, the last occurrence wins.
pub fn stage(existing_keys: &[String], document: &CsvDocument) -> SyncPlan {
    let mut last_occurrence: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, row) in document.rows.iter().enumerate() {
        last_occurrence.insert(normalize_key(&row.key), idx);
    }
    let mut kept: Vec<usize> = last_occurrence.into_values().collect();
    kept.sort_unstable();
    let upserts = kept
        .into_iter()
        .map(|idx| document.rows[idx].clone())
        .collect();

    let sheet_keys = document.normalized_keys();
    let removals = existing_keys
        .iter()
        .filter(|key| !sheet_keys.contains(&normalize_key(key)))
        .cloned()
        .collect();

    SyncPlan { upserts, removals }
}

#[derive(Debug, Default)]
struct ApplyCounts {
    added: usize,
    updated: usize,
    unchanged: usize,
}

/// Prior state of every touched key, replayed in reverse on rollback.
type UndoLog = Vec<(String, Option<LocaleValues>)>;

fn apply_plan<T: TranslationTable>(table: &mut T, plan: &SyncPlan) -> (ApplyCounts, UndoLog) {
    let mut counts = ApplyCounts::default();
    let mut undo: UndoLog = Vec::new();

    for row in &plan.upserts {
        match table.entry(&row.key) {
            Some(prior) if *prior == row.values => {
                counts.unchanged += 1;
                continue;
            }
            Some(prior) => {
                undo.push((row.key.clone(), Some(prior.clone())));
                counts.updated += 1;
            }
            None => {
                undo.push((row.key.clone(), None));
                counts.added += 1;
            }
        }
        table.upsert(&row.key, row.values.clone());
    }

    for key in &plan.removals {
        if let Some(prior) = table.remove(key) {
            info!(key = key.as_str(), "removed key absent from sheet");
            undo.push((key.clone(), Some(prior)));
        }
    }

    (counts, undo)
}

fn rollback<T: TranslationTable>(table: &mut T, undo: UndoLog) {
    for (key, prior) in undo.into_iter().rev() {
        match prior {
            Some(values) => table.upsert(&key, values),
            None => {
                table.remove(&key);
            }
        }
    }
}

/// Drives sync runs for one sheet URL and one table.
pub struct TableSync<T: TranslationTable> {
    fetcher: SheetFetcher,
    url: String,
    table: T,
}

impl<T: TranslationTable> TableSync<T> {
    /// Create an engine that downloads `url` with the given timeout and
    /// reconciles into `table`.
    pub fn new(url: impl Into<String>, timeout: Duration, table: T) -> Self {
        Self {
            fetcher: SheetFetcher::new(timeout),
            url: url.into(),
            table,
        }
    }

    /// The table being synchronised.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Run one full sync: fetch, parse, stage, apply, commit.
    ///
    /// On any error the durable table is unchanged, and on a commit
    /// failure the in-memory table is rolled back to its pre-run state.
    pub async fn sync(&mut self, cancel: &CancellationToken) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        info!(url = self.url.as_str(), "sync started");

        let text = self.fetcher.fetch(&self.url, cancel).await?;
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        let document = parse::parse(&text);
        debug!(
            rows = document.rows.len(),
            locales = document.locales.len(),
            skipped = document.skipped,
            "sheet parsed"
        );

        let existing = self.table.keys();
        let plan = stage(&existing, &document);

        let (counts, undo) = apply_plan(&mut self.table, &plan);
        if let Err(err) = self.table.commit() {
            warn!("commit failed, rolling back staged changes: {err}");
            rollback(&mut self.table, undo);
            return Err(err.into());
        }

        let report = SyncReport {
            added: counts.added,
            updated: counts.updated,
            unchanged: counts.unchanged,
            removed_keys: plan.removals,
            skipped: document.skipped,
            table_len: self.table.keys().len(),
            duration: started.elapsed(),
            finished_at: Utc::now(),
        };
        info!(
            added = report.added,
            updated = report.updated,
            removed = report.removed_keys.len(),
            unchanged = report.unchanged,
            skipped = report.skipped,
            keys = report.table_len,
            "sync finished"
        );
        Ok(report)
    }

    /// Run one sync in the background, reporting the outcome on `sender`.
    pub async fn run(
        mut self,
        sender: mpsc::Sender<SyncEvent>,
        cancel: CancellationToken,
    ) -> Result<()> {
        match self.sync(&cancel).await {
            Ok(report) => {
                sender
                    .send(SyncEvent::Success { report })
                    .await
                    .context("failed to send sync success event")?;
            }
            Err(err) => {
                let _ = sender.send(SyncEvent::Error(err)).await;
            }
        }
        Ok(())
    }
}
