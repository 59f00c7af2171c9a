//! Parse a source file into a tree-sitter tree.

use std::path::{Path, PathBuf};

use sqltype_core::errors::{ParseError, ScanError, SqltypeErrorCode};
use tree_sitter::{Parser, Tree};

use super::error_tolerant::count_errors;
use crate::scanner::SourceLanguage;

/// A parsed source file: text, tree, and the grammar used.
#[derive(Debug)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    pub language: SourceLanguage,
    pub error_count: u32,
}

/// Parse `source` with the grammar for `language`.
pub fn parse_source(
    source: String,
    path: &Path,
    language: SourceLanguage,
) -> Result<ParsedSource, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.ts_language())
        .map_err(|e| ParseError::GrammarLoad {
            grammar: language.name().to_string(),
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| ParseError::NoTree {
            path: path.to_path_buf(),
        })?;

    let error_count = count_errors(tree.root_node());
    if error_count > 0 {
        tracing::debug!(
            path = %path.display(),
            error_count,
            "syntax errors in source; scanning the recovered tree"
        );
    }

    Ok(ParsedSource {
        path: path.to_path_buf(),
        source,
        tree,
        language,
        error_count,
    })
}

/// Read and parse one file. Read failures are scan errors; grammar and tree
/// failures are parse errors.
pub fn parse_file(path: &Path, max_file_size: u64) -> Result<ParsedSource, FileError> {
    let ext = path.extension().and_then(|e| e.to_str());
    let language = SourceLanguage::from_extension(ext).ok_or_else(|| {
        FileError::Parse(ParseError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension: ext.unwrap_or_default().to_string(),
        })
    })?;

    let size = std::fs::metadata(path)
        .map_err(|source| ScanError::IoError {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > max_file_size {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_file_size,
        }
        .into());
    }

    let bytes = std::fs::read(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8(bytes).map_err(|_| ScanError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;

    Ok(parse_source(source, path, language)?)
}

/// Either half of a per-file failure.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SqltypeErrorCode for FileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
        }
    }
}

impl From<FileError> for sqltype_core::errors::GenerateError {
    fn from(e: FileError) -> Self {
        match e {
            FileError::Scan(e) => e.into(),
            FileError::Parse(e) => e.into(),
        }
    }
}
