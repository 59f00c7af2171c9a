//! # sqltype-analysis
//!
//! The generation pipeline for sqltype:
//! - `scanner` discovers TypeScript sources
//! - `parsers` builds tree-sitter syntax trees
//! - `queries` finds `<ident>.query(...)` call sites and resolves their SQL text
//! - `type_table` maps Postgres type OIDs to TypeScript type names
//! - `probe` applies migrations to a scratch database and describes each query
//! - `synth` renders the generated TypeScript module
//! - `pipeline` sequences one full generation run

pub mod parsers;
pub mod pipeline;
pub mod probe;
pub mod queries;
pub mod scanner;
pub mod synth;
pub mod type_table;

pub use pipeline::{generate, generate_with, GenerationReport};
