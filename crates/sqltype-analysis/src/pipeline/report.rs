//! Summary returned by a successful run.

use std::path::PathBuf;

use sqltype_core::diagnostics::Diagnostic;

#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Source files read and parsed.
    pub files_scanned: usize,
    /// Resolved call sites, duplicates included.
    pub query_calls: usize,
    /// Entries in the generated module.
    pub distinct_queries: usize,
    /// Every non-fatal finding, scan diagnostics first.
    pub diagnostics: Vec<Diagnostic>,
    pub output_path: PathBuf,
}
