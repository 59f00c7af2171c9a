//! Tests for the sqltype configuration system.

use std::path::Path;
use std::sync::Mutex;

use sqltype_core::config::SqltypeConfig;
use sqltype_core::constants::ENV_PREFIX;
use sqltype_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SQLTYPE_ env vars to prevent cross-test contamination.
fn clear_sqltype_env_vars() {
    for key in [
        "SQLTYPE_DATABASE_URL",
        "SQLTYPE_SOURCE_DIR",
        "SQLTYPE_MIGRATIONS_DIR",
        "SQLTYPE_OUTPUT_PATH",
        "SQLTYPE_METHOD_NAME",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_defaults_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sqltype_env_vars();

    let dir = tempdir();
    let config = SqltypeConfig::load(dir.path()).unwrap();

    assert_eq!(config.scan.effective_source_dir(), "src");
    assert_eq!(config.scan.effective_extensions(), vec!["ts", "tsx"]);
    assert_eq!(config.scan.effective_method_name(), "query");
    assert_eq!(config.database.effective_migrations_dir(), "migrations");
    assert_eq!(config.database.effective_migration_extension(), "sql");
    assert_eq!(config.output.effective_client_type(), "PGlite");
    assert_eq!(
        config.output_path(dir.path()),
        dir.path().join("src/sqltype.generated.ts")
    );
}

#[test]
fn test_env_overrides_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sqltype_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("sqltype.toml"),
        r#"
[scan]
source_dir = "app"
extensions = [".mts"]

[database]
url = "postgres://file@localhost/postgres"

[output]
path = "app/db-types.ts"
"#,
    )
    .unwrap();

    std::env::set_var("SQLTYPE_DATABASE_URL", "postgres://env@localhost/postgres");

    let config = SqltypeConfig::load(dir.path()).unwrap();

    // Env wins over the project file
    assert_eq!(
        config.database.effective_url(),
        "postgres://env@localhost/postgres"
    );
    // Project file wins over defaults
    assert_eq!(config.source_dir(dir.path()), dir.path().join("app"));
    assert_eq!(config.scan.effective_extensions(), vec!["mts"]);
    assert_eq!(config.output.effective_path(), "app/db-types.ts");

    clear_sqltype_env_vars();
}

#[test]
fn test_every_override_uses_the_env_prefix() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sqltype_env_vars();

    for (name, value) in [
        ("DATABASE_URL", "postgres://prefixed@localhost/postgres"),
        ("SOURCE_DIR", "lib"),
        ("MIGRATIONS_DIR", "db/migrations"),
        ("OUTPUT_PATH", "lib/types.ts"),
        ("METHOD_NAME", "sql"),
    ] {
        std::env::set_var(format!("{ENV_PREFIX}{name}"), value);
    }

    let dir = tempdir();
    let config = SqltypeConfig::load(dir.path()).unwrap();
    clear_sqltype_env_vars();

    assert_eq!(
        config.database.effective_url(),
        "postgres://prefixed@localhost/postgres"
    );
    assert_eq!(config.scan.effective_source_dir(), "lib");
    assert_eq!(config.database.effective_migrations_dir(), "db/migrations");
    assert_eq!(config.output.effective_path(), "lib/types.ts");
    assert_eq!(config.scan.effective_method_name(), "sql");
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sqltype_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("sqltype.toml"), "[scan\nsource_dir = 1").unwrap();

    let err = SqltypeConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_method_name_must_be_identifier() {
    let config = SqltypeConfig::from_toml(
        r#"
[scan]
method_name = "run query"
"#,
    )
    .unwrap();

    let err = SqltypeConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "scan.method_name"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_output_path_must_name_a_file() {
    let config = SqltypeConfig::from_toml(
        r#"
[output]
path = "src/generated/"
"#,
    )
    .unwrap();

    assert!(SqltypeConfig::validate(&config).is_err());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = SqltypeConfig::from_toml(
        r#"
[scan]
method_name = "sql"
future_option = true
"#,
    )
    .unwrap();
    assert_eq!(config.scan.effective_method_name(), "sql");
}

#[test]
fn test_toml_roundtrip_keeps_values() {
    let config = SqltypeConfig::from_toml(
        r#"
[database]
migrations_dir = "db/migrations"
"#,
    )
    .unwrap();

    let text = config.to_toml().unwrap();
    let again = SqltypeConfig::from_toml(&text).unwrap();
    assert_eq!(
        again.migrations_dir(Path::new("/p")),
        Path::new("/p/db/migrations")
    );
}
