//! Sequencing of a run. The order is fixed:
//!
//! 1. load migration scripts (filename order)
//! 2. create the probe and apply the migrations
//! 3. scan sources
//! 4. describe each distinct SQL text, first-seen order
//! 5. synthesize the module
//! 6. write it atomically
//!
//! The probe is disposed on every path once it exists.

use std::future::Future;
use std::path::Path;
use std::time::Instant;

use sqltype_core::config::SqltypeConfig;
use sqltype_core::errors::{GenerateError, ProbeError, SqltypeErrorCode};
use sqltype_core::events::{
    EventDispatcher, GenerationFailedEvent, GenerationStartedEvent, OutputWrittenEvent,
};

use super::output::write_atomic;
use super::report::GenerationReport;
use super::scan::scan_sources;
use crate::probe::{
    apply_migrations, describe_all, load_migrations, Migration, PgSchemaProbe, SchemaProbe,
};
use crate::synth::{synthesize, ModuleOptions};
use crate::type_table::SchemaTypeTable;

/// Run one generation for the project at `root` against Postgres.
pub async fn generate(
    root: &Path,
    config: &SqltypeConfig,
    events: &EventDispatcher,
) -> Result<GenerationReport, GenerateError> {
    let connect = PgSchemaProbe::connect(config.database.effective_url());
    generate_with(root, config, connect, events).await
}

/// Run one generation with a caller-supplied probe.
///
/// `connect` is not polled until the migrations have been loaded, so a
/// missing migrations directory never creates a database.
pub async fn generate_with<P, C>(
    root: &Path,
    config: &SqltypeConfig,
    connect: C,
    events: &EventDispatcher,
) -> Result<GenerationReport, GenerateError>
where
    P: SchemaProbe,
    C: Future<Output = Result<P, ProbeError>>,
{
    let started = Instant::now();
    let output_path = config.output_path(root);
    events.emit_generation_started(&GenerationStartedEvent {
        source_dir: config.source_dir(root),
        migrations_dir: config.migrations_dir(root),
        output_path: output_path.clone(),
    });

    let result = run(root, config, connect, events).await;
    match &result {
        Ok((report, bytes)) => events.emit_output_written(&OutputWrittenEvent {
            path: report.output_path.clone(),
            distinct_queries: report.distinct_queries,
            bytes: *bytes,
            duration_ms: started.elapsed().as_millis() as u64,
        }),
        Err(e) => events.emit_generation_failed(&GenerationFailedEvent {
            code: e.error_code(),
            message: e.to_string(),
        }),
    }
    result.map(|(report, _)| report)
}

async fn run<P, C>(
    root: &Path,
    config: &SqltypeConfig,
    connect: C,
    events: &EventDispatcher,
) -> Result<(GenerationReport, usize), GenerateError>
where
    P: SchemaProbe,
    C: Future<Output = Result<P, ProbeError>>,
{
    let migrations = load_migrations(
        &config.migrations_dir(root),
        config.database.effective_migration_extension(),
    )?;
    tracing::debug!(count = migrations.len(), "migrations loaded");

    let mut probe = connect.await?;
    let outcome = with_probe(&mut probe, &migrations, root, config, events).await;
    let disposed = probe.dispose().await;

    let outcome = outcome?;
    if let Err(e) = disposed {
        // The module is already written; a leaked scratch database is not fatal.
        tracing::warn!(error = %e, "failed to dispose scratch database");
    }
    Ok(outcome)
}

async fn with_probe<P: SchemaProbe>(
    probe: &mut P,
    migrations: &[Migration],
    root: &Path,
    config: &SqltypeConfig,
    events: &EventDispatcher,
) -> Result<(GenerationReport, usize), GenerateError> {
    apply_migrations(probe, migrations, events).await?;

    let output_path = config.output_path(root);
    let scan = scan_sources(
        &config.source_dir(root),
        config,
        vec![output_path.clone()],
        events,
    )
    .await?;

    for diagnostic in &scan.diagnostics {
        events.emit_diagnostic(diagnostic);
    }

    let descriptions = describe_all(probe, scan.sql_texts(), events).await?;

    let table = SchemaTypeTable::postgres();
    let synthesis = synthesize(
        &descriptions,
        &table,
        &ModuleOptions::from_config(&config.output),
    );
    for diagnostic in &synthesis.diagnostics {
        events.emit_diagnostic(diagnostic);
    }

    write_atomic(&output_path, &synthesis.module)?;

    let query_calls = scan.query_call_count();
    let mut diagnostics = scan.diagnostics;
    diagnostics.extend(synthesis.diagnostics);
    let report = GenerationReport {
        files_scanned: scan.files_scanned,
        query_calls,
        distinct_queries: descriptions.len(),
        diagnostics,
        output_path,
    };
    Ok((report, synthesis.module.len()))
}
