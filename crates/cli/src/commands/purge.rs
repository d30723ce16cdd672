use std::path::PathBuf;

use anyhow::Result;

use purge_core::purge::{purge_file, FileOutcome, PurgeReport};
use purge_core::strip::{Stripper, TARGET_FUNCTION};
use purge_core::walk::python_files;

use crate::canonicalize_or_current;

/// Run the reward-function purge over `root` and print a line-oriented
/// report.
///
/// Per-file failures are contained here: each one is printed with its path
/// and message, counted, and the loop moves on to the next file. The
/// returned report carries the final counters.
pub fn purge_command(root: &str) -> Result<PurgeReport> {
    let root_path = canonicalize_or_current(root)?;

    println!("Starting reward function purge...\n");

    let files: Vec<PathBuf> = python_files(&root_path).collect();
    if files.is_empty() {
        println!("No Python files found in {}", root_path.display());
        return Ok(PurgeReport::default());
    }

    println!("Found {} Python files to check\n", files.len());

    let stripper = Stripper::new(TARGET_FUNCTION)?;
    let mut report = PurgeReport { scanned: files.len(), ..PurgeReport::default() };

    for path in files {
        match purge_file(&stripper, &path) {
            Ok(FileOutcome::Skipped) => {}
            Ok(FileOutcome::Unchanged) => {
                println!("Processing: {}", path.display());
                println!("  - No changes needed for {}", path.display());
                report.unchanged += 1;
            }
            Ok(FileOutcome::Modified { .. }) => {
                println!("Processing: {}", path.display());
                println!("  ✓ Purged {} in {}", stripper.target(), path.display());
                report.modified += 1;
            }
            Err(err) => {
                println!("Processing: {}", path.display());
                println!("  ✗ Error processing {}: {err}", path.display());
                if err.restored() {
                    println!("    Restored from backup");
                }
                report.errors += 1;
            }
        }
    }

    print_summary(&report);

    Ok(report)
}

/// Final summary block, including the backup-cleanup reminder.
fn print_summary(report: &PurgeReport) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("Reward function purge complete!");
    println!("Files scanned: {}", report.scanned);
    println!("Files modified: {}", report.modified);
    println!("Errors: {}", report.errors);

    if report.modified > 0 {
        println!("\nNote: Backup files (.backup) have been created.");
        println!("Review changes and delete backups if satisfied:");
        println!("  find . -name '*.py.backup' -delete");
    }
    println!("{rule}");
}
