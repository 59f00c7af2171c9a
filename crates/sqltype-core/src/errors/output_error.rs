//! Generated module write errors.

use std::path::PathBuf;

use super::error_code::{self, SqltypeErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Could not create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write generated module {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not replace {path} with the generated module: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SqltypeErrorCode for OutputError {
    fn error_code(&self) -> &'static str {
        error_code::OUTPUT_ERROR
    }
}
