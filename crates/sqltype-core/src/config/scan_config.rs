//! Source scan configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the source scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Root of the application source tree, relative to the project root. Default: "src".
    pub source_dir: Option<String>,
    /// Extensions scanned, without the dot. Default: ["ts", "tsx"].
    pub extensions: Vec<String>,
    /// Method name that marks a query call site. Default: "query".
    pub method_name: Option<String>,
    /// Directory names skipped during the walk. Default: ["node_modules"].
    pub exclude: Vec<String>,
    /// Maximum source file size in bytes. Default: 1MB.
    pub max_file_size: Option<u64>,
}

impl ScanConfig {
    pub fn effective_source_dir(&self) -> &str {
        self.source_dir
            .as_deref()
            .unwrap_or(constants::DEFAULT_SOURCE_DIR)
    }

    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            constants::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        }
    }

    pub fn effective_method_name(&self) -> &str {
        self.method_name
            .as_deref()
            .unwrap_or(constants::DEFAULT_METHOD_NAME)
    }

    pub fn effective_exclude(&self) -> Vec<String> {
        if self.exclude.is_empty() {
            constants::DEFAULT_EXCLUDES
                .iter()
                .map(|e| e.to_string())
                .collect()
        } else {
            self.exclude.clone()
        }
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size
            .unwrap_or(constants::DEFAULT_MAX_FILE_SIZE)
    }
}
