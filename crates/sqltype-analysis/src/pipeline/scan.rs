//! Source scanning across the source directory.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sqltype_core::config::SqltypeConfig;
use sqltype_core::diagnostics::Diagnostic;
use sqltype_core::errors::{GenerateError, ScanError};
use sqltype_core::events::{EventDispatcher, FileScannedEvent};

use crate::parsers::{parse_file, FileError};
use crate::queries::{FileQueryCalls, FileScan, QueryCallExtractor};
use crate::scanner::{discover_sources, WalkOptions};

/// Everything found in one pass over the sources.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub files_scanned: usize,
    /// Only files with at least one resolved call, in path order.
    pub files: Vec<FileQueryCalls>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceScan {
    pub fn query_call_count(&self) -> usize {
        self.files.iter().map(|f| f.query_calls.len()).sum()
    }

    /// SQL texts in first-seen order, duplicates included.
    pub fn sql_texts(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(|f| f.query_calls.iter().map(|c| c.sql.as_str()))
    }
}

/// Discover, read and scan every source file under `source_dir`.
///
/// Files are parsed in parallel on the blocking pool; results are reassembled
/// in path order so the outcome does not depend on scheduling. The first
/// unreadable or unparsable file aborts the scan.
pub async fn scan_sources(
    source_dir: &Path,
    config: &SqltypeConfig,
    skip_files: Vec<PathBuf>,
    events: &EventDispatcher,
) -> Result<SourceScan, GenerateError> {
    let options = WalkOptions {
        extensions: config.scan.effective_extensions(),
        exclude_dirs: config.scan.effective_exclude(),
        skip_files,
    };
    let source_dir = source_dir.to_path_buf();
    let max_file_size = config.scan.effective_max_file_size();
    let extractor = QueryCallExtractor::new(config.scan.effective_method_name());

    let task = tokio::task::spawn_blocking(move || {
        scan_paths(&source_dir, &options, max_file_size, &extractor)
    });
    let scanned = match task.await {
        Ok(scanned) => scanned?,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            return Err(ScanError::TaskFailed {
                message: e.to_string(),
            }
            .into())
        }
    };

    let mut result = SourceScan {
        files_scanned: scanned.len(),
        ..SourceScan::default()
    };
    for (path, scan) in scanned {
        events.emit_file_scanned(&FileScannedEvent {
            path: path.clone(),
            query_calls: scan.query_calls.len(),
        });
        result.diagnostics.extend(scan.diagnostics);
        if !scan.query_calls.is_empty() {
            result.files.push(FileQueryCalls {
                file_path: path,
                query_calls: scan.query_calls,
            });
        }
    }

    tracing::debug!(
        files = result.files_scanned,
        calls = result.query_call_count(),
        "source scan complete"
    );
    Ok(result)
}

fn scan_paths(
    source_dir: &Path,
    options: &WalkOptions,
    max_file_size: u64,
    extractor: &QueryCallExtractor,
) -> Result<Vec<(PathBuf, FileScan)>, GenerateError> {
    let paths = discover_sources(source_dir, options)?;
    let scanned = paths
        .par_iter()
        .map(|path| {
            let parsed = parse_file(path, max_file_size)?;
            let scan = extractor.extract(&parsed.tree, &parsed.source, path);
            Ok((path.clone(), scan))
        })
        .collect::<Result<_, FileError>>()?;
    Ok(scanned)
}
