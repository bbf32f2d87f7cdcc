//! Snapshot file sink.
//!
//! One JSON document per run, named `<dd>-<mm>-<YYYY>.json` inside a
//! pre-validated output directory. The write goes through a temp file and a
//! rename so a crashed run never leaves a half-written snapshot behind.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use roster_core::error::{Result, RosterError};
use roster_core::models::Snapshot;

/// Writes finished snapshots to a validated output directory.
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    output_dir: PathBuf,
}

impl SnapshotSink {
    /// Validate the directory up front: the path must be non-empty and exist
    /// before any network work starts.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        if output_dir.as_os_str().is_empty() {
            return Err(RosterError::Config(
                "output directory must not be empty".to_string(),
            ));
        }
        if !output_dir.is_dir() {
            return Err(RosterError::OutputPathNotFound(output_dir));
        }
        Ok(Self { output_dir })
    }

    /// The directory snapshots land in.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Filename for a run on `date`.
    pub fn filename(date: NaiveDate) -> String {
        date.format("%d-%m-%Y.json").to_string()
    }

    /// Serialize `snapshot` and write it for `date`, returning the final path.
    pub fn write(&self, snapshot: &Snapshot, date: NaiveDate) -> Result<PathBuf> {
        let path = self.output_dir.join(Self::filename(date));
        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &path)?;

        info!(path = %path.display(), "snapshot written");
        Ok(path)
    }
}
