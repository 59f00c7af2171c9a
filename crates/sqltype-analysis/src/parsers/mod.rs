//! Tree-sitter parsing for scanned sources.

pub mod error_tolerant;
pub mod parser;

pub use parser::{parse_file, parse_source, FileError, ParsedSource};
