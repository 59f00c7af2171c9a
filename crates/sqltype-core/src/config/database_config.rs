//! Scratch database and migration configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Admin connection URL. The scratch database is created through it.
    pub url: Option<String>,
    /// Directory of migration scripts, relative to the project root. Default: "migrations".
    pub migrations_dir: Option<String>,
    /// Extension of migration scripts. Default: "sql".
    pub migration_extension: Option<String>,
}

impl DatabaseConfig {
    pub fn effective_url(&self) -> &str {
        self.url.as_deref().unwrap_or(constants::DEFAULT_DATABASE_URL)
    }

    pub fn effective_migrations_dir(&self) -> &str {
        self.migrations_dir
            .as_deref()
            .unwrap_or(constants::DEFAULT_MIGRATIONS_DIR)
    }

    pub fn effective_migration_extension(&self) -> &str {
        self.migration_extension
            .as_deref()
            .map(|e| e.trim_start_matches('.'))
            .unwrap_or(constants::DEFAULT_MIGRATION_EXTENSION)
    }
}
