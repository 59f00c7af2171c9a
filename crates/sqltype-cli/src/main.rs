mod args;
mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sqltype_core::config::SqltypeConfig;
use sqltype_core::events::{EventDispatcher, TracingEventHandler};

use crate::args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    sqltype_core::tracing::init_tracing();

    let root = std::env::current_dir().context("could not determine the project root")?;
    let config = SqltypeConfig::load(&root).context("could not load configuration")?;

    let mut events = EventDispatcher::new();
    events.register(Arc::new(TracingEventHandler));

    if args.watch {
        watch::watch(&root, &config, &events).await
    } else {
        generate_once(&root, &config, &events).await
    }
}

pub(crate) async fn generate_once(
    root: &Path,
    config: &SqltypeConfig,
    events: &EventDispatcher,
) -> anyhow::Result<()> {
    let report = sqltype_analysis::generate(root, config, events)
        .await
        .context("generation failed")?;
    tracing::info!(
        files = report.files_scanned,
        calls = report.query_calls,
        queries = report.distinct_queries,
        diagnostics = report.diagnostics.len(),
        "done"
    );
    Ok(())
}
