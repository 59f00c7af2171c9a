//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, SqltypeErrorCode};

/// Errors that can occur when building a syntax tree for a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to load grammar {grammar}: {message}")]
    GrammarLoad { grammar: String, message: String },

    #[error("Tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("Unsupported source extension {extension:?} for {path}")]
    UnsupportedExtension { path: PathBuf, extension: String },
}

impl SqltypeErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedExtension { .. } => error_code::UNSUPPORTED_EXTENSION,
            _ => error_code::PARSE_ERROR,
        }
    }
}
