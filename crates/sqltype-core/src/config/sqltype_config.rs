//! Top-level sqltype configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DatabaseConfig, OutputConfig, ScanConfig};
use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SQLTYPE_*`)
/// 2. Project config (`sqltype.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SqltypeConfig {
    pub scan: ScanConfig,
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

impl SqltypeConfig {
    /// Load configuration for the project rooted at `root`.
    /// A missing `sqltype.toml` is not an error; defaults apply.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SqltypeConfig) -> Result<(), ConfigError> {
        if !is_identifier(config.scan.effective_method_name()) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.method_name".to_string(),
                message: "must be a valid identifier".to_string(),
            });
        }
        if config
            .scan
            .effective_extensions()
            .iter()
            .any(|e| e.is_empty() || e.contains('/'))
        {
            return Err(ConfigError::ValidationFailed {
                field: "scan.extensions".to_string(),
                message: "extensions must be non-empty and contain no path separators".to_string(),
            });
        }
        if config.scan.effective_max_file_size() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let output = config.output.effective_path();
        if output.is_empty() || output.ends_with('/') || output.ends_with('\\') {
            return Err(ConfigError::ValidationFailed {
                field: "output.path".to_string(),
                message: "must name a file".to_string(),
            });
        }
        for (field, value) in [
            ("output.client_type", config.output.effective_client_type()),
            ("output.result_wrapper", config.output.effective_result_wrapper()),
        ] {
            if !is_identifier(value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be a valid identifier".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Absolute source directory for the project rooted at `root`.
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(self.scan.effective_source_dir())
    }

    /// Absolute migrations directory for the project rooted at `root`.
    pub fn migrations_dir(&self, root: &Path) -> PathBuf {
        root.join(self.database.effective_migrations_dir())
    }

    /// Absolute path of the generated module for the project rooted at `root`.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.output.effective_path())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SqltypeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SqltypeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut SqltypeConfig, other: &SqltypeConfig) {
        // Scan
        if other.scan.source_dir.is_some() {
            base.scan.source_dir = other.scan.source_dir.clone();
        }
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if other.scan.method_name.is_some() {
            base.scan.method_name = other.scan.method_name.clone();
        }
        if !other.scan.exclude.is_empty() {
            base.scan.exclude = other.scan.exclude.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }

        // Database
        if other.database.url.is_some() {
            base.database.url = other.database.url.clone();
        }
        if other.database.migrations_dir.is_some() {
            base.database.migrations_dir = other.database.migrations_dir.clone();
        }
        if other.database.migration_extension.is_some() {
            base.database.migration_extension = other.database.migration_extension.clone();
        }

        // Output
        if other.output.path.is_some() {
            base.output.path = other.output.path.clone();
        }
        if other.output.client_module.is_some() {
            base.output.client_module = other.output.client_module.clone();
        }
        if other.output.client_type.is_some() {
            base.output.client_type = other.output.client_type.clone();
        }
        if other.output.result_wrapper.is_some() {
            base.output.result_wrapper = other.output.result_wrapper.clone();
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut SqltypeConfig) {
        if let Some(val) = env_override("DATABASE_URL") {
            config.database.url = Some(val);
        }
        if let Some(val) = env_override("SOURCE_DIR") {
            config.scan.source_dir = Some(val);
        }
        if let Some(val) = env_override("MIGRATIONS_DIR") {
            config.database.migrations_dir = Some(val);
        }
        if let Some(val) = env_override("OUTPUT_PATH") {
            config.output.path = Some(val);
        }
        if let Some(val) = env_override("METHOD_NAME") {
            config.scan.method_name = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// JavaScript identifier check, ASCII subset.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `SQLTYPE_<name>`, if set.
fn env_override(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}")).ok()
}
