//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "sqltype_cli=info,sqltype_analysis=info,sqltype_core=info";

/// Initialize the sqltype tracing/logging system.
///
/// Reads the `SQLTYPE_LOG` environment variable for per-target log levels.
/// Format: `SQLTYPE_LOG=sqltype_analysis::scanner=debug,sqltype_analysis::probe=info`
///
/// Falls back to `info` for the three sqltype crates if `SQLTYPE_LOG` is
/// unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SQLTYPE_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).without_time())
            .with(filter)
            .init();
    });
}
