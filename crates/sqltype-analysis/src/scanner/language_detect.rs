//! Grammar selection from file extension.

use serde::{Deserialize, Serialize};

/// The two grammars a scanned file can be parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    /// Plain source: `.ts`, `.mts`, `.cts`, and JavaScript files.
    TypeScript,
    /// Component source with JSX: `.tsx`, `.jsx`.
    Tsx,
}

impl SourceLanguage {
    /// Detect the grammar from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<SourceLanguage> {
        match ext? {
            "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => Some(SourceLanguage::TypeScript),
            "tsx" | "jsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Returns the display name of the grammar.
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TSX",
        }
    }

    /// Get the tree-sitter language grammar.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
