//! SchemaProbe: migrations applied to a scratch database, then one describe
//! per distinct SQL text.
//!
//! Every request goes through `&mut self`, so a probe never has two requests
//! in flight against its database.

pub mod migrations;
pub mod postgres;

use indexmap::IndexMap;
use sqltype_core::errors::ProbeError;
use sqltype_core::events::{EventDispatcher, MigrationAppliedEvent, QueryDescribedEvent};

pub use migrations::{load_migrations, Migration};
pub use postgres::{PgSchemaProbe, ScratchDatabase};

/// Parameter and result shape of one statement, as type-ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryDescription {
    /// One type-id per positional placeholder, `$1` first.
    pub param_types: Vec<u32>,
    /// Result columns in row order.
    pub result_columns: Vec<ResultColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    pub name: String,
    pub type_id: u32,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, type_id: u32) -> Self {
        Self {
            name: name.into(),
            type_id,
        }
    }
}

/// Descriptions keyed by exact SQL text, in first-seen order.
pub type QueryDescriptions = IndexMap<String, QueryDescription>;

/// A database that can run migration scripts and describe statements.
#[allow(async_fn_in_trait)]
pub trait SchemaProbe {
    /// Execute one migration script. Its effects persist for later requests.
    async fn apply_migration(&mut self, migration: &Migration) -> Result<(), ProbeError>;

    /// Prepare `sql` without executing it and report its shape.
    async fn describe(&mut self, sql: &str) -> Result<QueryDescription, ProbeError>;

    /// Release the database. Called exactly once, on every exit path.
    async fn dispose(self) -> Result<(), ProbeError>
    where
        Self: Sized;
}

/// Apply `migrations` in the order given. The first failure aborts.
pub async fn apply_migrations<P: SchemaProbe>(
    probe: &mut P,
    migrations: &[Migration],
    events: &EventDispatcher,
) -> Result<(), ProbeError> {
    let total = migrations.len();
    for (index, migration) in migrations.iter().enumerate() {
        probe.apply_migration(migration).await?;
        tracing::debug!(migration = %migration.name, "migration applied");
        events.emit_migration_applied(&MigrationAppliedEvent {
            name: migration.name.clone(),
            index,
            total,
        });
    }
    Ok(())
}

/// Describe each query once, sequentially, keeping the order of `queries`.
pub async fn describe_all<P, I, S>(
    probe: &mut P,
    queries: I,
    events: &EventDispatcher,
) -> Result<QueryDescriptions, ProbeError>
where
    P: SchemaProbe,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut descriptions = QueryDescriptions::new();
    for sql in queries {
        let sql = sql.as_ref();
        if descriptions.contains_key(sql) {
            continue;
        }
        let description = probe.describe(sql).await?;
        events.emit_query_described(&QueryDescribedEvent {
            sql: sql.to_string(),
            param_count: description.param_types.len(),
            column_count: description.result_columns.len(),
        });
        descriptions.insert(sql.to_string(), description);
    }
    Ok(descriptions)
}

/// Migrations then describes against one probe.
pub async fn probe<P, I, S>(
    target: &mut P,
    migrations: &[Migration],
    queries: I,
    events: &EventDispatcher,
) -> Result<QueryDescriptions, ProbeError>
where
    P: SchemaProbe,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    apply_migrations(target, migrations, events).await?;
    describe_all(target, queries, events).await
}
