//! Orchestrator: one full, from-scratch generation run.

pub mod orchestrator;
pub mod output;
pub mod report;
pub mod scan;

pub use orchestrator::{generate, generate_with};
pub use report::GenerationReport;
pub use scan::{scan_sources, SourceScan};
