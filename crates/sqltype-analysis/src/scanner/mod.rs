//! Scanner subsystem: source file discovery and language detection.

pub mod language_detect;
pub mod walker;

pub use language_detect::SourceLanguage;
pub use walker::{discover_sources, WalkOptions};
