use clap::Parser;
use sqltype_core::constants::VERSION;

/// Generate TypeScript types for the SQL queries embedded in a project.
///
/// Run from the project root. Settings come from `sqltype.toml` and
/// `SQLTYPE_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "sqltype", version = VERSION)]
pub struct Args {
    /// Keep running and regenerate when a source or migration file changes
    #[arg(short, long)]
    pub watch: bool,
}
