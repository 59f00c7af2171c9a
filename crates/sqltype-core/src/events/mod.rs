//! Generation events: the injected logging capability of a run.
//!
//! The pipeline never logs user-facing progress directly; it emits events to
//! an `EventDispatcher`, and whoever drives the run decides what to do with
//! them. A dispatcher without handlers changes nothing about the output.

pub mod dispatcher;
pub mod handler;
pub mod tracing_handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::GenerationEventHandler;
pub use tracing_handler::TracingEventHandler;
pub use types::*;
