//! Known-key search over YAML configuration files.
//!
//! Walks a tree for `*.yaml` files and reports any of a fixed list of
//! configuration-key names carrying a present value, at the document top
//! level and one nesting level down.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;
use walkdir::WalkDir;

/// Keys that may point at environment configuration entries.
pub const CONFIG_KEYS: &[&str] = &[
    "env_cfg_entry_point",
    "env_cfg_path",
    "env_config",
    "environment_config",
    "config_path",
    "env_module",
];

/// Error type for scanning a single YAML file.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid YAML file: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// One known key found with a present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigHit {
    pub file: PathBuf,
    /// `key`, or `section.key` for entries one level down.
    pub key: String,
    pub value: String,
}

/// Walk `root` and yield every `*.yaml` file, skipping `.git` directories.
pub fn yaml_files(root: impl AsRef<Path>) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.file_name().to_string_lossy() != ".git")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("yaml"))
}

/// Parse one YAML file and collect its known-key hits.
///
/// Non-mapping documents produce no hits. Keys whose values are absent in
/// the truthiness sense (null, false, zero, empty string or collection) are
/// not reported.
pub fn scan_file(path: &Path) -> Result<Vec<ConfigHit>, ScanError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ScanError::Read { path: path.to_path_buf(), source })?;
    let doc: Value = serde_yaml::from_str(&text)
        .map_err(|source| ScanError::Parse { path: path.to_path_buf(), source })?;

    let mut hits = Vec::new();
    let Value::Mapping(mapping) = &doc else {
        return Ok(hits);
    };

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        if CONFIG_KEYS.contains(&key) && is_present(value) {
            hits.push(ConfigHit {
                file: path.to_path_buf(),
                key: key.to_string(),
                value: render(value),
            });
        }

        // One nesting level down: sections holding their own config maps.
        if let Value::Mapping(section) = value {
            for (inner_key, inner_value) in section {
                let Some(inner_key) = inner_key.as_str() else {
                    continue;
                };
                if CONFIG_KEYS.contains(&inner_key) && is_present(inner_value) {
                    hits.push(ConfigHit {
                        file: path.to_path_buf(),
                        key: format!("{key}.{inner_key}"),
                        value: render(inner_value),
                    });
                }
            }
        }
    }

    Ok(hits)
}

/// Null, false, zero, the empty string, and empty collections do not count
/// as configured values.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_present(&tagged.value),
    }
}

/// Render a value for the report; strings as-is, everything else as YAML.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
