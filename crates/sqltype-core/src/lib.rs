//! # sqltype-core
//!
//! Foundation crate for sqltype. Contains the error enums, configuration
//! loading, generation events, diagnostics, tracing setup and shared constants.
//! It has no knowledge of tree-sitter or Postgres.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod events;
pub mod tracing;
