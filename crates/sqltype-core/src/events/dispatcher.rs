//! EventDispatcher: synchronous event dispatch, free when empty.

use std::sync::Arc;

use super::handler::GenerationEventHandler;
use super::types::*;
use crate::diagnostics::Diagnostic;

/// Synchronous dispatcher wrapping a list of handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn GenerationEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn GenerationEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn GenerationEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("generation event handler panicked; continuing");
            }
        }
    }

    pub fn emit_generation_started(&self, event: &GenerationStartedEvent) {
        self.emit(|h| h.on_generation_started(event));
    }

    pub fn emit_migration_applied(&self, event: &MigrationAppliedEvent) {
        self.emit(|h| h.on_migration_applied(event));
    }

    pub fn emit_file_scanned(&self, event: &FileScannedEvent) {
        self.emit(|h| h.on_file_scanned(event));
    }

    pub fn emit_query_described(&self, event: &QueryDescribedEvent) {
        self.emit(|h| h.on_query_described(event));
    }

    pub fn emit_diagnostic(&self, diagnostic: &Diagnostic) {
        self.emit(|h| h.on_diagnostic(diagnostic));
    }

    pub fn emit_output_written(&self, event: &OutputWrittenEvent) {
        self.emit(|h| h.on_output_written(event));
    }

    pub fn emit_generation_failed(&self, event: &GenerationFailedEvent) {
        self.emit(|h| h.on_generation_failed(event));
    }
}
