//! Snapshot persistence. The naming contract is fixed: one dated
//! `hf_data_<date>.json` per collection day plus a `latest.json` mirror.
//! Current data is always read from `latest.json`; directory scanning exists
//! only for the archive listing and trend history.

use crate::Snapshot;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_PREFIX: &str = "hf_data_";
pub const LATEST_FILE: &str = "latest.json";

pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn latest_path(&self) -> PathBuf {
        self.root.join(LATEST_FILE)
    }

    pub fn dated_path(&self, date: &str) -> PathBuf {
        self.root.join(format!("{DATA_PREFIX}{date}.json"))
    }

    /// Write the dated snapshot, then mirror it to `latest.json`. Both writes
    /// go through a temp file and rename so a concurrent reader never sees a
    /// torn file. Errors here are fatal to the caller.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&self.dated_path(&snapshot.date), &json)?;
        write_atomic(&self.latest_path(), &json)?;
        Ok(())
    }

    pub fn load_latest(&self) -> Result<Snapshot> {
        read_snapshot(&self.latest_path())
    }

    pub fn load_date(&self, date: &str) -> Result<Snapshot> {
        read_snapshot(&self.dated_path(date))
    }

    /// Dates of archived snapshots, ascending. A missing data directory is
    /// an empty archive, not an error.
    pub fn archive_dates(&self) -> Result<Vec<String>> {
        let mut dates = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return Ok(dates),
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(rest) = name.strip_prefix(DATA_PREFIX) {
                if let Some(date) = rest.strip_suffix(".json") {
                    if !date.is_empty() {
                        dates.push(date.to_string());
                    }
                }
            }
        }
        dates.sort();
        Ok(dates)
    }

    /// Up to the last `days` archived snapshots, ascending by date.
    /// Unreadable archives are skipped with a warning.
    pub fn load_history(&self, days: usize) -> Result<Vec<Snapshot>> {
        let dates = self.archive_dates()?;
        let start = dates.len().saturating_sub(days);
        let mut history = Vec::with_capacity(dates.len() - start);
        for date in &dates[start..] {
            match self.load_date(date) {
                Ok(snapshot) => history.push(snapshot),
                Err(err) => tracing::warn!(%err, %date, "skipping unreadable snapshot"),
            }
        }
        Ok(history)
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(snapshot)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
