//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_generation_started`.
#[derive(Debug, Clone)]
pub struct GenerationStartedEvent {
    pub source_dir: PathBuf,
    pub migrations_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Payload for `on_migration_applied`.
#[derive(Debug, Clone)]
pub struct MigrationAppliedEvent {
    pub name: String,
    pub index: usize,
    pub total: usize,
}

/// Payload for `on_file_scanned`.
#[derive(Debug, Clone)]
pub struct FileScannedEvent {
    pub path: PathBuf,
    pub query_calls: usize,
}

/// Payload for `on_query_described`.
#[derive(Debug, Clone)]
pub struct QueryDescribedEvent {
    pub sql: String,
    pub param_count: usize,
    pub column_count: usize,
}

/// Payload for `on_output_written`.
#[derive(Debug, Clone)]
pub struct OutputWrittenEvent {
    pub path: PathBuf,
    pub distinct_queries: usize,
    pub bytes: usize,
    pub duration_ms: u64,
}

/// Payload for `on_generation_failed`.
#[derive(Debug, Clone)]
pub struct GenerationFailedEvent {
    pub code: &'static str,
    pub message: String,
}
