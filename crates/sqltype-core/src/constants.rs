//! Shared constants for sqltype.

/// sqltype version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project configuration file, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "sqltype.toml";

/// Prefix for every environment override (`SQLTYPE_DATABASE_URL`, ...).
pub const ENV_PREFIX: &str = "SQLTYPE_";

// ---- Scan ----

pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Plain source first, component source second.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// Method name marking a query call site: `<ident>.query(...)`.
pub const DEFAULT_METHOD_NAME: &str = "query";

/// Directory names never descended into.
pub const DEFAULT_EXCLUDES: [&str; 1] = ["node_modules"];

/// Maximum source file size in bytes (default: 1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

// ---- Database ----

/// Admin connection used to create and drop scratch databases.
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/postgres";

pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

pub const DEFAULT_MIGRATION_EXTENSION: &str = "sql";

/// Name prefix of scratch databases created for a run.
pub const SCRATCH_DATABASE_PREFIX: &str = "sqltype_scratch";

// ---- Output ----

pub const DEFAULT_OUTPUT_PATH: &str = "src/sqltype.generated.ts";

/// Module the ambient client type is imported from.
pub const DEFAULT_CLIENT_MODULE: &str = "@electric-sql/pglite";

/// Ambient client type whose `query` method gets narrowed.
pub const DEFAULT_CLIENT_TYPE: &str = "PGlite";

/// Generic result container returned by the client's `query`.
pub const DEFAULT_RESULT_WRAPPER: &str = "Results";

// ---- Watch ----

/// Debounce window for filesystem events in watch mode.
pub const WATCH_DEBOUNCE_MS: u64 = 300;
