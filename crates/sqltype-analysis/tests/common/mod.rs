//! Shared fixtures: an in-memory probe and project builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sqltype_analysis::probe::{Migration, QueryDescription, ResultColumn, SchemaProbe};
use sqltype_core::errors::ProbeError;

/// What a [`MemoryProbe`] was asked to do, readable after the probe is consumed.
#[derive(Debug, Default)]
pub struct ProbeLog {
    pub applied: Vec<String>,
    pub described: Vec<String>,
    pub disposed: bool,
}

/// Describes from a fixed catalog; unknown SQL fails like a real prepare would.
pub struct MemoryProbe {
    catalog: HashMap<String, QueryDescription>,
    failing_migration: Option<String>,
    log: Arc<Mutex<ProbeLog>>,
}

impl MemoryProbe {
    pub fn new() -> (Self, Arc<Mutex<ProbeLog>>) {
        let log = Arc::new(Mutex::new(ProbeLog::default()));
        (
            Self {
                catalog: HashMap::new(),
                failing_migration: None,
                log: log.clone(),
            },
            log,
        )
    }

    pub fn with_query(mut self, sql: &str, params: &[u32], columns: &[(&str, u32)]) -> Self {
        self.catalog.insert(
            sql.to_string(),
            QueryDescription {
                param_types: params.to_vec(),
                result_columns: columns
                    .iter()
                    .map(|&(name, oid)| ResultColumn::new(name, oid))
                    .collect(),
            },
        );
        self
    }

    pub fn failing_migration(mut self, name: &str) -> Self {
        self.failing_migration = Some(name.to_string());
        self
    }
}

impl SchemaProbe for MemoryProbe {
    async fn apply_migration(&mut self, migration: &Migration) -> Result<(), ProbeError> {
        if self.failing_migration.as_deref() == Some(migration.name.as_str()) {
            return Err(ProbeError::MigrationFailed {
                name: migration.name.clone(),
                message: "syntax error".to_string(),
            });
        }
        self.log.lock().unwrap().applied.push(migration.name.clone());
        Ok(())
    }

    async fn describe(&mut self, sql: &str) -> Result<QueryDescription, ProbeError> {
        self.log.lock().unwrap().described.push(sql.to_string());
        self.catalog
            .get(sql)
            .cloned()
            .ok_or_else(|| ProbeError::DescribeFailed {
                sql: sql.to_string(),
                message: "relation does not exist".to_string(),
            })
    }

    async fn dispose(self) -> Result<(), ProbeError> {
        self.log.lock().unwrap().disposed = true;
        Ok(())
    }
}

/// Write `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

pub const PEOPLE_MIGRATION: &str =
    "CREATE TABLE people (id int, name text, age int, city text);";

pub const PEOPLE_BY_CITY: &str = "SELECT name, city, age FROM people WHERE city = $1";

pub const INSERT_PERSON: &str =
    "INSERT INTO people (id, name, age, city) VALUES ($1, $2, $3, $4)";
