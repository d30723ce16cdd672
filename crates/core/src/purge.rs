//! The per-file purge transaction: read, back up, strip, write or roll back.
//!
//! [`purge_file`] treats one file as a scoped unit. The backup is created
//! before any mutation and is explicitly released (discarded) or retained
//! depending on outcome; restoration on error is the rollback path. After it
//! returns, the file is either untouched with no backup, modified with a
//! backup holding the pre-modification content, or restored with the backup
//! still present.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backup::{BackupError, FileBackup};
use crate::strip::{StripError, Stripper};

/// Error type for the per-file transaction.
#[derive(Debug, Error)]
pub enum PurgeError {
    /// Reading the source failed; no backup was created.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backup operation failed. On creation failure the original is
    /// untouched; on discard failure it is unchanged with a stray backup
    /// left beside it.
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// The stripper rejected the file; the original was restored and the
    /// backup kept.
    #[error("failed to strip {}: {source}", path.display())]
    Strip {
        path: PathBuf,
        #[source]
        source: StripError,
    },

    /// Writing the stripped content failed; the original was restored and
    /// the backup kept.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Restoration itself failed after an earlier error. The backup still
    /// holds the pre-modification content.
    #[error("failed to restore {} after {cause}: {source}", path.display())]
    RestoreFailed {
        path: PathBuf,
        cause: String,
        #[source]
        source: BackupError,
    },
}

impl PurgeError {
    /// True when the original file was restored from its backup.
    pub fn restored(&self) -> bool {
        matches!(self, Self::Strip { .. } | Self::Write { .. })
    }

    /// True when a backup with the pre-modification content remains on disk.
    pub fn backup_retained(&self) -> bool {
        matches!(self, Self::Strip { .. } | Self::Write { .. } | Self::RestoreFailed { .. })
    }
}

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// No target definition in the file; nothing was created or changed.
    Skipped,
    /// The target was present but already in stripped form; the backup was
    /// discarded.
    Unchanged,
    /// The file was rewritten; the backup with the original content is kept.
    Modified { backup: PathBuf },
}

/// Aggregate counters for one purge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Candidate files enumerated under the root.
    pub scanned: usize,
    /// Files rewritten, each with a backup kept beside it.
    pub modified: usize,
    /// Files containing the target that needed no change.
    pub unchanged: usize,
    /// Files that errored; each was rolled back when a backup existed.
    pub errors: usize,
}

/// Run the read/backup/strip/write pipeline for a single file.
pub fn purge_file(stripper: &Stripper, path: &Path) -> Result<FileOutcome, PurgeError> {
    let content = fs::read_to_string(path)
        .map_err(|source| PurgeError::Read { path: path.to_path_buf(), source })?;

    if !stripper.mentions_target(&content) {
        return Ok(FileOutcome::Skipped);
    }

    let backup = FileBackup::create(path)?;

    let stripped = match stripper.strip(&content) {
        Ok(stripped) => stripped,
        Err(source) => {
            let cause = PurgeError::Strip { path: path.to_path_buf(), source };
            return Err(roll_back(&backup, path, cause));
        }
    };

    if !stripped.changed {
        backup.discard()?;
        return Ok(FileOutcome::Unchanged);
    }

    if let Err(source) = fs::write(path, &stripped.content) {
        let cause = PurgeError::Write { path: path.to_path_buf(), source };
        return Err(roll_back(&backup, path, cause));
    }

    Ok(FileOutcome::Modified { backup: backup.keep() })
}

/// Restore `path` from `backup`, preferring to report the original cause.
fn roll_back(backup: &FileBackup, path: &Path, cause: PurgeError) -> PurgeError {
    match backup.restore() {
        Ok(()) => cause,
        Err(source) => PurgeError::RestoreFailed {
            path: path.to_path_buf(),
            cause: cause.to_string(),
            source,
        },
    }
}
