//! Recursive discovery of candidate Python source files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::backup::is_backup_path;

/// File extension of candidate source files.
pub const SOURCE_EXTENSION: &str = "py";

/// Pure predicate: is this a Python source path, by extension?
pub fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

/// Pure predicate: should this path be offered to the purge driver?
///
/// Backup copies are excluded here, regardless of their content.
pub fn is_candidate(path: &Path) -> bool {
    has_source_extension(path) && !is_backup_path(path)
}

/// Walk `root` and yield every candidate Python file, lazily, in no
/// particular order.
///
/// Re-invoking re-walks the tree. Unreadable entries are skipped rather than
/// reported; a missing root simply yields nothing.
pub fn python_files(root: impl AsRef<Path>) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_candidate(path))
}
