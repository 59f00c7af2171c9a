//! Source scanning over real directories.

mod common;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use common::write_tree;
use sqltype_analysis::pipeline::scan_sources;
use sqltype_core::config::SqltypeConfig;
use sqltype_core::diagnostics::Diagnostic;
use sqltype_core::errors::{GenerateError, ScanError};
use sqltype_core::events::{EventDispatcher, FileScannedEvent, GenerationEventHandler};

#[tokio::test]
async fn scans_ts_and_tsx_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("b.ts", "db.query('SELECT 2');"),
            ("a/inner.tsx", "const x = <div>{db.query(`SELECT 1`)}</div>;"),
            ("notes.md", "db.query('SELECT 3')"),
            ("node_modules/lib/index.ts", "db.query('SELECT 4');"),
        ],
    );

    let scan = scan_sources(
        dir.path(),
        &SqltypeConfig::default(),
        vec![],
        &EventDispatcher::new(),
    )
    .await
    .unwrap();

    assert_eq!(scan.files_scanned, 2);
    let sqls: Vec<&str> = scan.sql_texts().collect();
    assert_eq!(sqls, vec!["SELECT 1", "SELECT 2"]);
}

#[tokio::test]
async fn files_without_matches_are_not_grouped() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[("empty.ts", "export const x = 1;"), ("one.ts", "pg.query('SELECT 1');")],
    );

    let scan = scan_sources(
        dir.path(),
        &SqltypeConfig::default(),
        vec![],
        &EventDispatcher::new(),
    )
    .await
    .unwrap();

    assert_eq!(scan.files_scanned, 2);
    assert_eq!(scan.files.len(), 1);
    assert!(scan.files[0].file_path.ends_with("one.ts"));
}

#[tokio::test]
async fn configured_method_name_is_the_marker() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[("a.ts", "db.query('SELECT 1'); db.sql('SELECT 2');")],
    );
    let config = SqltypeConfig::from_toml("[scan]\nmethod_name = \"sql\"\n").unwrap();

    let scan = scan_sources(dir.path(), &config, vec![], &EventDispatcher::new())
        .await
        .unwrap();

    let sqls: Vec<&str> = scan.sql_texts().collect();
    assert_eq!(sqls, vec!["SELECT 2"]);
}

#[tokio::test]
async fn diagnostics_carry_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("a.ts", "db.query(build());")]);

    let scan = scan_sources(
        dir.path(),
        &SqltypeConfig::default(),
        vec![],
        &EventDispatcher::new(),
    )
    .await
    .unwrap();

    match &scan.diagnostics[..] {
        [Diagnostic::UnresolvedLiteral { file, line, column, .. }] => {
            assert!(file.ends_with("a.ts"));
            assert_eq!((*line, *column), (1, 1));
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
}

#[tokio::test]
async fn missing_source_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_sources(
        &dir.path().join("src"),
        &SqltypeConfig::default(),
        vec![],
        &EventDispatcher::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Scan(ScanError::SourceDirNotFound { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn invalid_utf8_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0x00]).unwrap();
    let err = scan_sources(
        dir.path(),
        &SqltypeConfig::default(),
        vec![],
        &EventDispatcher::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, GenerateError::Scan(ScanError::InvalidUtf8 { .. })));
}

#[derive(Default)]
struct ScannedPaths(Mutex<Vec<PathBuf>>);

impl GenerationEventHandler for ScannedPaths {
    fn on_file_scanned(&self, event: &FileScannedEvent) {
        self.0.lock().unwrap().push(event.path.clone());
    }
}

#[tokio::test]
async fn scan_yields_to_other_tasks_and_reports_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<(String, String)> = (0..16)
        .map(|i| (format!("f{i:02}.ts"), format!("db.query('SELECT {i}');")))
        .collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    write_tree(dir.path(), &refs);

    let recorder = Arc::new(ScannedPaths::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());

    // Single-threaded runtime: this only runs if the scan awaits.
    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();
    tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

    let scan = scan_sources(dir.path(), &SqltypeConfig::default(), vec![], &events)
        .await
        .unwrap();

    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(scan.files_scanned, 16);
    let seen = recorder.0.lock().unwrap().clone();
    let mut sorted = seen.clone();
    sorted.sort();
    assert_eq!(seen.len(), 16);
    assert_eq!(seen, sorted);
}
