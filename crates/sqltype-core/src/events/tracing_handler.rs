//! Handler that forwards generation events to `tracing`.

use super::handler::GenerationEventHandler;
use super::types::*;
use crate::diagnostics::Diagnostic;

/// Logs every event at a level matching its weight: progress at `debug`,
/// milestones at `info`, diagnostics at `warn`, failures at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl GenerationEventHandler for TracingEventHandler {
    fn on_generation_started(&self, event: &GenerationStartedEvent) {
        tracing::info!(
            source_dir = %event.source_dir.display(),
            migrations_dir = %event.migrations_dir.display(),
            "generating query types"
        );
    }

    fn on_migration_applied(&self, event: &MigrationAppliedEvent) {
        tracing::debug!(
            migration = %event.name,
            index = event.index + 1,
            total = event.total,
            "applied migration"
        );
    }

    fn on_file_scanned(&self, event: &FileScannedEvent) {
        tracing::debug!(
            path = %event.path.display(),
            query_calls = event.query_calls,
            "scanned file"
        );
    }

    fn on_query_described(&self, event: &QueryDescribedEvent) {
        tracing::debug!(
            params = event.param_count,
            columns = event.column_count,
            sql = %event.sql,
            "described query"
        );
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        tracing::warn!(code = diagnostic.code(), "{diagnostic}");
    }

    fn on_output_written(&self, event: &OutputWrittenEvent) {
        tracing::info!(
            path = %event.path.display(),
            queries = event.distinct_queries,
            bytes = event.bytes,
            duration_ms = event.duration_ms,
            "wrote generated types"
        );
    }

    fn on_generation_failed(&self, event: &GenerationFailedEvent) {
        tracing::error!(code = event.code, "{}", event.message);
    }
}
