//! SqltypeErrorCode trait: stable machine-readable codes for every error.

/// Every error enum implements this so callers (the CLI, editor integrations)
/// can branch on a fixed code instead of parsing messages.
pub trait SqltypeErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_EXTENSION: &str = "UNSUPPORTED_EXTENSION";
pub const DB_CONNECT_FAILED: &str = "DB_CONNECT_FAILED";
pub const SCRATCH_DB_FAILED: &str = "SCRATCH_DB_FAILED";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const DESCRIBE_FAILED: &str = "DESCRIBE_FAILED";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
