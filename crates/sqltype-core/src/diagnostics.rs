//! Non-fatal diagnostics produced during a generation run.
//!
//! A diagnostic never aborts a run. Diagnostics are collected into the run
//! report and forwarded to every registered event handler.

use std::fmt;
use std::path::PathBuf;

/// Why a call site's first argument could not be turned into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The call has no arguments at all.
    NoArguments,
    /// The first argument is an expression kind that is never folded.
    NotALiteral { kind: String },
    /// No declaration for the identifier is visible from the call site.
    IdentifierNotFound { name: String },
    /// The declaration's initializer is another identifier (a second hop).
    ChainedIdentifier { name: String, target: String },
    /// The declaration's initializer is neither a literal nor an identifier.
    InitializerNotALiteral { name: String, kind: String },
    /// The identifier is bound by something other than an initialized variable
    /// (parameter, import, function, uninitialized `let`).
    NotAVariable { name: String },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArguments => f.write_str("call has no arguments"),
            Self::NotALiteral { kind } => write!(f, "argument is a {kind}, not a string literal"),
            Self::IdentifierNotFound { name } => {
                write!(f, "no declaration of `{name}` in this file")
            }
            Self::ChainedIdentifier { name, target } => write!(
                f,
                "`{name}` is initialized from `{target}`; only one level of indirection is resolved"
            ),
            Self::InitializerNotALiteral { name, kind } => {
                write!(f, "`{name}` is initialized with a {kind}, not a string literal")
            }
            Self::NotAVariable { name } => {
                write!(f, "`{name}` is not a variable initialized with a literal")
            }
        }
    }
}

/// Where an unmapped type-id occurred within a query description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSlot {
    /// Zero-based positional parameter (`$1` is index 0).
    Parameter(usize),
    /// Result column by name.
    Column(String),
}

impl fmt::Display for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(index) => write!(f, "parameter ${}", index + 1),
            Self::Column(name) => write!(f, "column `{name}`"),
        }
    }
}

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A matched call site whose SQL text could not be determined; it was skipped.
    UnresolvedLiteral {
        file: PathBuf,
        line: u32,
        column: u32,
        reason: UnresolvedReason,
    },
    /// A type-id absent from the type table; the `unknown` marker was emitted.
    UnmappedType {
        sql: String,
        type_id: u32,
        slot: TypeSlot,
    },
    /// A result shape repeats a column name; the first occurrence was kept.
    DuplicateColumn { sql: String, column: String },
}

impl Diagnostic {
    /// Stable short code, like the error codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnresolvedLiteral { .. } => "UNRESOLVED_LITERAL",
            Self::UnmappedType { .. } => "UNMAPPED_TYPE",
            Self::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLiteral {
                file,
                line,
                column,
                reason,
            } => write!(
                f,
                "{}:{line}:{column}: skipped query call: {reason}",
                file.display()
            ),
            Self::UnmappedType { sql, type_id, slot } => write!(
                f,
                "unmapped type id {type_id} for {slot} in query {sql:?}; emitted `unknown`"
            ),
            Self::DuplicateColumn { sql, column } => write!(
                f,
                "duplicate result column `{column}` in query {sql:?}; kept the first"
            ),
        }
    }
}
