//! Source discovery and read errors.

use std::path::PathBuf;

use super::error_code::{self, SqltypeErrorCode};

/// Errors that can occur while discovering or reading source files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Source directory not found: {path}")]
    SourceDirNotFound { path: PathBuf },

    #[error("Directory walk failed under {root}: {message}")]
    WalkFailed { root: PathBuf, message: String },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Source file is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    #[error("Source scan task did not finish: {message}")]
    TaskFailed { message: String },
}

impl SqltypeErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => error_code::FILE_TOO_LARGE,
            _ => error_code::SCAN_ERROR,
        }
    }
}
