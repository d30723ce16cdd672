//! Backup copies and the skip predicate for backup-suffixed files.
//!
//! Every mutation of a source file is preceded by a `FileBackup`, which owns
//! the on-disk copy until the caller decides its fate: discarded when no
//! change was needed, kept for operator review after a successful rewrite,
//! or used to restore the original when something went wrong in between.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Extension appended to a file's name to form its backup's name.
///
/// `foo.py` becomes `foo.py.backup`.
pub const BACKUP_EXTENSION: &str = "backup";

/// Error type for backup operations.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("failed to copy {} to {}: {source}", original.display(), backup.display())]
    Copy {
        original: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The copy on disk does not match the original it was taken from.
    #[error("backup {} does not match {} (digest mismatch)", backup.display(), original.display())]
    Mismatch { original: PathBuf, backup: PathBuf },

    #[error("failed to hash {}: {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove backup {}: {source}", backup.display())]
    Remove {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to restore {} from {}: {source}", original.display(), backup.display())]
    Restore {
        original: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// Compute the backup path for `path` by appending the backup extension.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// Pure predicate: does this path carry the backup extension?
///
/// The walker applies this so backup copies are never treated as candidate
/// source files, independent of traversal order.
pub fn is_backup_path(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(BACKUP_EXTENSION)
}

/// A backup copy of one file, held while that file is being rewritten.
#[derive(Debug)]
pub struct FileBackup {
    original: PathBuf,
    backup: PathBuf,
}

impl FileBackup {
    /// Copy `original` to its backup path and verify the copy by digest.
    ///
    /// The original is not touched. A pre-existing backup at the same path
    /// is overwritten.
    pub fn create(original: impl AsRef<Path>) -> BackupResult<Self> {
        let original = original.as_ref().to_path_buf();
        let backup = backup_path_for(&original);

        fs::copy(&original, &backup).map_err(|source| BackupError::Copy {
            original: original.clone(),
            backup: backup.clone(),
            source,
        })?;

        // The backup is the only rollback point; it must be intact before the
        // caller mutates the original.
        if sha256_file(&original)? != sha256_file(&backup)? {
            return Err(BackupError::Mismatch { original, backup });
        }

        Ok(Self { original, backup })
    }

    /// Path of the backup copy on disk.
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Copy the backup's content back over the original.
    pub fn restore(&self) -> BackupResult<()> {
        // Replace the file rather than writing through it; the failed write
        // may have left it unwritable in place.
        let _ = fs::remove_file(&self.original);
        fs::copy(&self.backup, &self.original).map(|_| ()).map_err(|source| {
            BackupError::Restore {
                original: self.original.clone(),
                backup: self.backup.clone(),
                source,
            }
        })
    }

    /// Delete the backup; the original did not need to change.
    pub fn discard(self) -> BackupResult<()> {
        fs::remove_file(&self.backup)
            .map_err(|source| BackupError::Remove { backup: self.backup.clone(), source })
    }

    /// Retain the backup for operator review, returning its path.
    pub fn keep(self) -> PathBuf {
        self.backup
    }
}

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> BackupResult<String> {
    let file = fs::File::open(path)
        .map_err(|source| BackupError::Hash { path: path.to_path_buf(), source })?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|source| BackupError::Hash { path: path.to_path_buf(), source })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
