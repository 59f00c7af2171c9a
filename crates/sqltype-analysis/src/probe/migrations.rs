//! Migration script discovery.
//!
//! Scripts run in ascending byte-wise order of their file names. That order is
//! the only control a project has over execution order, so zero-padded or
//! dated prefixes (`001-create.sql`, `2024-01-05-alter.sql`) are the way to
//! sequence them.

use std::path::{Path, PathBuf};

use sqltype_core::errors::ProbeError;

/// One migration script, read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// File name, the sort key.
    pub name: String,
    pub path: PathBuf,
    pub sql: String,
}

/// Read every `*.{extension}` file directly inside `dir`, sorted by file name.
/// Subdirectories are not descended into.
pub fn load_migrations(dir: &Path, extension: &str) -> Result<Vec<Migration>, ProbeError> {
    if !dir.is_dir() {
        return Err(ProbeError::MigrationsDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| ProbeError::MigrationRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ProbeError::MigrationRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        paths.push((name.to_string(), path));
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    paths
        .into_iter()
        .map(|(name, path)| {
            let sql = std::fs::read_to_string(&path).map_err(|source| {
                ProbeError::MigrationRead {
                    path: path.clone(),
                    source,
                }
            })?;
            Ok(Migration { name, path, sql })
        })
        .collect()
}
