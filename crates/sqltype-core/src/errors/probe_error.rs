//! Schema probe errors: scratch database lifecycle, migrations, describe.

use std::path::PathBuf;

use super::error_code::{self, SqltypeErrorCode};

/// Errors raised while talking to the scratch database. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Could not connect to {target}: {message}")]
    Connect { target: String, message: String },

    #[error("Could not create scratch database {name}: {message}")]
    CreateDatabase { name: String, message: String },

    #[error("Could not drop scratch database {name}: {message}")]
    DropDatabase { name: String, message: String },

    #[error("Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: PathBuf },

    #[error("Could not read migration {path}: {source}")]
    MigrationRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Migration {name} failed: {message}")]
    MigrationFailed { name: String, message: String },

    #[error("Describe failed for query {sql:?}: {message}")]
    DescribeFailed { sql: String, message: String },
}

impl SqltypeErrorCode for ProbeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => error_code::DB_CONNECT_FAILED,
            Self::CreateDatabase { .. } | Self::DropDatabase { .. } => {
                error_code::SCRATCH_DB_FAILED
            }
            Self::MigrationsDirNotFound { .. }
            | Self::MigrationRead { .. }
            | Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::DescribeFailed { .. } => error_code::DESCRIBE_FAILED,
        }
    }
}
