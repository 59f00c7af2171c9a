//! Configuration system for sqltype.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod database_config;
pub mod output_config;
pub mod scan_config;
pub mod sqltype_config;

pub use database_config::DatabaseConfig;
pub use output_config::OutputConfig;
pub use scan_config::ScanConfig;
pub use sqltype_config::SqltypeConfig;
