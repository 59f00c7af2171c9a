//! Postgres realization of the probe: a throwaway database per run.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use sqltype_core::constants::SCRATCH_DATABASE_PREFIX;
use sqltype_core::errors::ProbeError;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};

use super::{Migration, QueryDescription, ResultColumn, SchemaProbe};

/// A database created for one run and dropped when the run ends.
///
/// Holds two connections: the admin connection that created the database
/// (needed again to drop it) and a connection to the scratch database itself.
pub struct ScratchDatabase {
    name: String,
    admin: Connection,
    scratch: Connection,
}

struct Connection {
    client: Client,
    task: JoinHandle<()>,
}

impl Connection {
    async fn open(config: &Config, target: &str) -> Result<Self, ProbeError> {
        let (client, connection) =
            config
                .connect(NoTls)
                .await
                .map_err(|e| ProbeError::Connect {
                    target: target.to_string(),
                    message: pg_message(&e),
                })?;
        let target = target.to_string();
        let task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(target_db = %target, error = %e, "postgres connection error");
            }
        });
        Ok(Self { client, task })
    }

    /// Drop the client and wait for the connection task to finish.
    async fn close(self) {
        drop(self.client);
        let _ = self.task.await;
    }
}

impl ScratchDatabase {
    /// Create a uniquely named empty database through `admin_url`.
    pub async fn create(admin_url: &str) -> Result<Self, ProbeError> {
        let admin_config = Config::from_str(admin_url).map_err(|e| ProbeError::Connect {
            target: redact(admin_url),
            message: e.to_string(),
        })?;
        let admin = Connection::open(&admin_config, &redact(admin_url)).await?;

        let name = scratch_name();
        admin
            .client
            .batch_execute(&format!("CREATE DATABASE {}", quote_ident(&name)))
            .await
            .map_err(|e| ProbeError::CreateDatabase {
                name: name.clone(),
                message: pg_message(&e),
            })?;
        tracing::debug!(database = %name, "scratch database created");

        let mut scratch_config = admin_config.clone();
        scratch_config.dbname(&name);
        let scratch = match Connection::open(&scratch_config, &name).await {
            Ok(scratch) => scratch,
            Err(e) => {
                let _ = drop_database(&admin.client, &name).await;
                admin.close().await;
                return Err(e);
            }
        };

        Ok(Self {
            name,
            admin,
            scratch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connection to the scratch database.
    pub fn client(&self) -> &Client {
        &self.scratch.client
    }

    /// Close the scratch connection, then drop the database.
    pub async fn dispose(self) -> Result<(), ProbeError> {
        let Self {
            name,
            admin,
            scratch,
        } = self;
        scratch.close().await;
        let result = drop_database(&admin.client, &name).await;
        admin.close().await;
        if result.is_ok() {
            tracing::debug!(database = %name, "scratch database dropped");
        }
        result
    }
}

/// [`SchemaProbe`] backed by a [`ScratchDatabase`].
pub struct PgSchemaProbe {
    database: ScratchDatabase,
}

impl PgSchemaProbe {
    pub async fn connect(admin_url: &str) -> Result<Self, ProbeError> {
        Ok(Self {
            database: ScratchDatabase::create(admin_url).await?,
        })
    }

    pub fn database(&self) -> &ScratchDatabase {
        &self.database
    }
}

impl SchemaProbe for PgSchemaProbe {
    async fn apply_migration(&mut self, migration: &Migration) -> Result<(), ProbeError> {
        self.database
            .client()
            .batch_execute(&migration.sql)
            .await
            .map_err(|e| ProbeError::MigrationFailed {
                name: migration.name.clone(),
                message: pg_message(&e),
            })
    }

    async fn describe(&mut self, sql: &str) -> Result<QueryDescription, ProbeError> {
        let statement = self
            .database
            .client()
            .prepare(sql)
            .await
            .map_err(|e| ProbeError::DescribeFailed {
                sql: sql.to_string(),
                message: pg_message(&e),
            })?;

        Ok(QueryDescription {
            param_types: statement.params().iter().map(|t| t.oid()).collect(),
            result_columns: statement
                .columns()
                .iter()
                .map(|c| ResultColumn::new(c.name(), c.type_().oid()))
                .collect(),
        })
    }

    async fn dispose(self) -> Result<(), ProbeError> {
        self.database.dispose().await
    }
}

async fn drop_database(admin: &Client, name: &str) -> Result<(), ProbeError> {
    admin
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_ident(name)
        ))
        .await
        .map_err(|e| ProbeError::DropDatabase {
            name: name.to_string(),
            message: pg_message(&e),
        })
}

fn scratch_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{SCRATCH_DATABASE_PREFIX}_{}_{nanos}", std::process::id())
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Server message when there is one, the client error otherwise.
fn pg_message(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => match db.position() {
            Some(tokio_postgres::error::ErrorPosition::Original(pos)) => {
                format!("{} (at character {pos})", db.message())
            }
            _ => db.message().to_string(),
        },
        None => e.to_string(),
    }
}

/// Drop the password component of a connection URL for messages.
fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
