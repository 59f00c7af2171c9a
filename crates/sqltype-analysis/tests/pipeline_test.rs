//! End-to-end generation runs against the in-memory probe.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use sqltype_analysis::generate_with;
use sqltype_core::config::SqltypeConfig;
use sqltype_core::diagnostics::{Diagnostic, UnresolvedReason};
use sqltype_core::errors::{GenerateError, ProbeError, SqltypeErrorCode};
use sqltype_core::events::{EventDispatcher, GenerationEventHandler, GenerationFailedEvent};

fn people_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("migrations/1-create.sql", PEOPLE_MIGRATION),
            ("migrations/2-alter.sql", "ALTER TABLE people ADD email text;"),
            (
                "src/people.ts",
                r#"
import { db } from "./db";

export async function byCity(cityArg: string) {
  return db.query("SELECT name, city, age FROM people WHERE city = $1", [cityArg]);
}

const insert = "INSERT INTO people (id, name, age, city) VALUES ($1, $2, $3, $4)";
export async function add() {
  await db.query(insert, [1, "Ada", 36, "London"]);
}
"#,
            ),
            (
                "src/views/List.tsx",
                r#"
export function List({ city }: { city: string }) {
  const rows = db.query("SELECT name, city, age FROM people WHERE city = $1", [city]);
  return <ul>{city}</ul>;
}
"#,
            ),
        ],
    );
    dir
}

fn people_probe() -> (MemoryProbe, Arc<Mutex<ProbeLog>>) {
    let (probe, log) = MemoryProbe::new();
    let probe = probe
        .with_query(
            PEOPLE_BY_CITY,
            &[25],
            &[("name", 25), ("city", 25), ("age", 23)],
        )
        .with_query(INSERT_PERSON, &[23, 25, 23, 25], &[]);
    (probe, log)
}

async fn run(
    root: &std::path::Path,
    probe: MemoryProbe,
) -> Result<sqltype_analysis::GenerationReport, GenerateError> {
    let config = SqltypeConfig::default();
    let connect = async { Ok::<_, ProbeError>(probe) };
    generate_with(root, &config, connect, &EventDispatcher::new()).await
}

#[tokio::test]
async fn people_scenario_end_to_end() {
    let project = people_project();
    let (probe, log) = people_probe();

    let report = run(project.path(), probe).await.unwrap();

    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.query_calls, 3);
    assert_eq!(report.distinct_queries, 2);
    assert!(report.diagnostics.is_empty());

    let module = std::fs::read_to_string(&report.output_path).unwrap();
    assert!(module.contains("type Params0 = [string];"));
    assert!(module.contains("type Result0 = {\n  name: string;\n  city: string;\n  age: number;\n};"));
    assert!(module.contains("type Params1 = [number, string, number, string];"));

    let log = log.lock().unwrap();
    assert_eq!(log.applied, vec!["1-create.sql", "2-alter.sql"]);
    assert!(log.disposed);
}

#[tokio::test]
async fn identical_sql_is_described_once() {
    let project = people_project();
    let (probe, log) = people_probe();

    let report = run(project.path(), probe).await.unwrap();
    let module = std::fs::read_to_string(&report.output_path).unwrap();

    assert_eq!(module.matches(&format!("\"{PEOPLE_BY_CITY}\"")).count(), 1);
    assert_eq!(
        log.lock().unwrap().described,
        vec![PEOPLE_BY_CITY.to_string(), INSERT_PERSON.to_string()]
    );
}

#[tokio::test]
async fn consecutive_runs_are_byte_identical() {
    let project = people_project();

    let first = run(project.path(), people_probe().0).await.unwrap();
    let first = std::fs::read(&first.output_path).unwrap();
    let second = run(project.path(), people_probe().0).await.unwrap();
    let second = std::fs::read(&second.output_path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn generated_module_is_not_scanned() {
    let project = people_project();
    run(project.path(), people_probe().0).await.unwrap();

    // The module now exists under src/ and contains `query(` text.
    let report = run(project.path(), people_probe().0).await.unwrap();
    assert_eq!(report.files_scanned, 2);
}

#[tokio::test]
async fn unresolvable_call_is_a_diagnostic_not_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("migrations/1-create.sql", PEOPLE_MIGRATION),
            (
                "src/mixed.ts",
                r#"
const base = "SELECT name, city, age FROM people WHERE city = $1";
const alias = base;
db.query(base, ["Paris"]);
db.query(alias, ["Rome"]);
"#,
            ),
        ],
    );
    let (probe, _) = people_probe();

    let report = run(dir.path(), probe).await.unwrap();

    assert_eq!(report.distinct_queries, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        Diagnostic::UnresolvedLiteral {
            line: 5,
            reason: UnresolvedReason::ChainedIdentifier { .. },
            ..
        }
    ));
    let module = std::fs::read_to_string(&report.output_path).unwrap();
    assert!(module.contains("type Params0 = [string];"));
}

#[tokio::test]
async fn describe_failure_aborts_without_output_and_disposes() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("migrations/1-create.sql", PEOPLE_MIGRATION),
            ("src/bad.ts", "db.query('SELECT nope FROM missing');"),
        ],
    );
    let (probe, log) = MemoryProbe::new();

    let err = run(dir.path(), probe).await.unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Probe(ProbeError::DescribeFailed { .. })
    ));
    assert_eq!(err.error_code(), "DESCRIBE_FAILED");
    assert!(!dir.path().join("src/sqltype.generated.ts").exists());
    assert!(log.lock().unwrap().disposed);
}

#[tokio::test]
async fn migration_failure_stops_at_the_failing_script() {
    let project = people_project();
    let (probe, log) = people_probe();
    let probe = probe.failing_migration("2-alter.sql");

    let err = run(project.path(), probe).await.unwrap_err();

    assert_eq!(err.error_code(), "MIGRATION_FAILED");
    let log = log.lock().unwrap();
    assert_eq!(log.applied, vec!["1-create.sql"]);
    assert!(log.described.is_empty());
    assert!(log.disposed);
}

#[tokio::test]
async fn missing_migrations_dir_never_connects() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("src/a.ts", "db.query('SELECT 1');")]);

    let config = SqltypeConfig::default();
    let connected = Arc::new(Mutex::new(false));
    let flag = connected.clone();
    let connect = async move {
        *flag.lock().unwrap() = true;
        Ok::<_, ProbeError>(MemoryProbe::new().0)
    };

    let err = generate_with(dir.path(), &config, connect, &EventDispatcher::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Probe(ProbeError::MigrationsDirNotFound { .. })
    ));
    assert!(!*connected.lock().unwrap());
}

#[derive(Default)]
struct FailureRecorder {
    codes: Mutex<Vec<&'static str>>,
}

impl GenerationEventHandler for FailureRecorder {
    fn on_generation_failed(&self, event: &GenerationFailedEvent) {
        self.codes.lock().unwrap().push(event.code);
    }
}

#[tokio::test]
async fn failure_is_reported_to_handlers() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("migrations/1.sql", ""), ("src/a.ts", "")]);
    std::fs::write(dir.path().join("src/big.ts"), "x".repeat(64)).unwrap();

    let config = SqltypeConfig::from_toml("[scan]\nmax_file_size = 16\n").unwrap();
    let recorder = Arc::new(FailureRecorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());

    let connect = async { Ok::<_, ProbeError>(MemoryProbe::new().0) };
    let err = generate_with(dir.path(), &config, connect, &events)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "FILE_TOO_LARGE");
    assert_eq!(*recorder.codes.lock().unwrap(), vec!["FILE_TOO_LARGE"]);
}
