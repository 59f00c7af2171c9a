//! Top-level error of a generation run.

use super::error_code::SqltypeErrorCode;
use super::{ConfigError, OutputError, ParseError, ProbeError, ScanError};

/// A fatal condition that aborts one generation run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SqltypeErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Probe(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
