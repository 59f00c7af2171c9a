//! Generated module configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Generated module path, relative to the project root.
    pub path: Option<String>,
    /// Module the client type is imported from.
    pub client_module: Option<String>,
    /// Client type whose `query` method is narrowed.
    pub client_type: Option<String>,
    /// Generic container wrapping result rows (`Results<T>` for PGlite).
    pub result_wrapper: Option<String>,
}

impl OutputConfig {
    pub fn effective_path(&self) -> &str {
        self.path.as_deref().unwrap_or(constants::DEFAULT_OUTPUT_PATH)
    }

    pub fn effective_client_module(&self) -> &str {
        self.client_module
            .as_deref()
            .unwrap_or(constants::DEFAULT_CLIENT_MODULE)
    }

    pub fn effective_client_type(&self) -> &str {
        self.client_type
            .as_deref()
            .unwrap_or(constants::DEFAULT_CLIENT_TYPE)
    }

    pub fn effective_result_wrapper(&self) -> &str {
        self.result_wrapper
            .as_deref()
            .unwrap_or(constants::DEFAULT_RESULT_WRAPPER)
    }
}
