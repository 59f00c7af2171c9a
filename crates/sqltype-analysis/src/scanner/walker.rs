//! Recursive source discovery using the `ignore` walker.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sqltype_core::errors::ScanError;

/// What to include and skip during discovery.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Extensions without the dot.
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Exact files never returned (the generated module).
    pub skip_files: Vec<PathBuf>,
}

/// Recursively list every file under `root` whose extension is in
/// `options.extensions`, sorted by path.
///
/// Standard ignore filters (gitignore, hidden files) are off: the configured
/// source directory is scanned in full apart from `exclude_dirs`.
pub fn discover_sources(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceDirNotFound {
            path: root.to_path_buf(),
        });
    }

    let exclude: HashSet<String> = options.exclude_dirs.iter().cloned().collect();
    let skip: HashSet<PathBuf> = options.skip_files.iter().map(|p| normalize(p)).collect();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && exclude.contains(&*entry.file_name().to_string_lossy()))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ScanError::WalkFailed {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| options.extensions.iter().any(|want| want == ext));
        if !matches_ext || skip.contains(&normalize(path)) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "discovered sources");
    Ok(files)
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
