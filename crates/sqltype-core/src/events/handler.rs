//! GenerationEventHandler trait, all methods with no-op defaults.

use super::types::*;
use crate::diagnostics::Diagnostic;

/// Trait for observing a generation run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` because file scans
/// may run on worker threads.
pub trait GenerationEventHandler: Send + Sync {
    fn on_generation_started(&self, _event: &GenerationStartedEvent) {}
    fn on_migration_applied(&self, _event: &MigrationAppliedEvent) {}
    fn on_file_scanned(&self, _event: &FileScannedEvent) {}
    fn on_query_described(&self, _event: &QueryDescribedEvent) {}
    fn on_diagnostic(&self, _diagnostic: &Diagnostic) {}
    fn on_output_written(&self, _event: &OutputWrittenEvent) {}
    fn on_generation_failed(&self, _event: &GenerationFailedEvent) {}
}
