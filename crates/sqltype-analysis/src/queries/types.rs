//! Call-site data produced by a scan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sqltype_core::diagnostics::Diagnostic;

/// One matched call site with resolved SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCall {
    pub sql: String,
    /// Source text of every argument after the first, unevaluated.
    pub args: Vec<String>,
    /// 1-based position of the call expression.
    pub line: u32,
    pub column: u32,
}

/// All query calls of one file, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileQueryCalls {
    pub file_path: PathBuf,
    pub query_calls: Vec<QueryCall>,
}

/// Full result of scanning one file.
#[derive(Debug, Clone, Default)]
pub struct FileScan {
    pub query_calls: Vec<QueryCall>,
    pub diagnostics: Vec<Diagnostic>,
}
