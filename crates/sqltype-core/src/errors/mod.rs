//! Error handling for sqltype.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod generate_error;
pub mod output_error;
pub mod parse_error;
pub mod probe_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use error_code::SqltypeErrorCode;
pub use generate_error::GenerateError;
pub use output_error::OutputError;
pub use parse_error::ParseError;
pub use probe_error::ProbeError;
pub use scan_error::ScanError;
