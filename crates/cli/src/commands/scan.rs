use std::path::PathBuf;

use anyhow::{Context, Result};

use purge_core::scan::{scan_file, yaml_files, ConfigHit};

use crate::canonicalize_or_current;

/// Scan `root` for YAML files and report known configuration keys.
///
/// Unreadable or unparseable files are reported on stderr and skipped; the
/// scan itself always runs to completion.
pub fn scan_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;

    let files: Vec<PathBuf> = yaml_files(&root_path).collect();
    if !json {
        println!("Found {} YAML files in total.", files.len());
    }

    let mut hits: Vec<ConfigHit> = Vec::new();
    for path in files {
        match scan_file(&path) {
            Ok(mut found) => hits.append(&mut found),
            Err(err) => eprintln!("Error scanning {}: {err}", path.display()),
        }
    }

    if json {
        let serialized =
            serde_json::to_string_pretty(&hits).context("Failed to serialize hits to JSON")?;
        println!("{serialized}");
        return Ok(());
    }

    if hits.is_empty() {
        println!("\nNo environment configuration entries found in any YAML files.");
        return Ok(());
    }

    println!("\nFound environment configuration entries:");
    for hit in hits {
        println!("\n{}:", hit.file.display());
        println!("  {}: {}", hit.key, hit.value);
    }

    Ok(())
}
