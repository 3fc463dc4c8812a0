use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("name: test_project").unwrap();
    assert_eq!(config.name, "test_project");
    assert_eq!(config.migrations_path, "migrations");
    assert_eq!(config.version_table, "tidemark_version");
    assert_eq!(config.dialect, Dialect::DuckDb);
    assert_eq!(config.database.path, "tidemark.duckdb");
    assert!(config.validate().is_ok());

    let root = PathBuf::from("/tmp/test");
    assert_eq!(
        config.migrations_path_absolute(&root),
        root.join("migrations")
    );
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: warehouse
migrations_path: db/migrations
dialect: duckdb
version_table: schema_versions
database:
  type: duckdb
  path: "./warehouse.duckdb"
targets:
  ci:
    database:
      type: duckdb
      path: ":memory:"
  prod: {}
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.migrations_path, "db/migrations");
    assert_eq!(config.version_table, "schema_versions");
    assert_eq!(config.available_targets(), vec!["ci", "prod"]);
    assert_eq!(config.database_for(None).unwrap().path, "./warehouse.duckdb");
    assert_eq!(config.database_for(Some("ci")).unwrap().path, ":memory:");
    assert_eq!(
        config.database_for(Some("prod")).unwrap().path,
        "./warehouse.duckdb"
    );
}

#[test]
fn test_unknown_target() {
    let config = Config::new("test");
    match config.database_for(Some("staging")) {
        Err(CoreError::UnknownTarget { name, .. }) => assert_eq!(name, "staging"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("name: test\nmodel_paths: [x]");
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_empty_database_path() {
    let mut config = Config::new("test");
    config.database.path = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_validate_rejects_bad_version_table() {
    let mut config = Config::new("test");
    config.version_table = "versions; DROP TABLE x".to_string();
    assert!(config.validate().is_err());
    config.version_table = "1versions".to_string();
    assert!(config.validate().is_err());
    config.version_table = "_versions_2".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_dir() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("tidemark.yaml"), "name: from_yaml\n").unwrap();
    let config = Config::load_from_dir(tmp.path()).unwrap();
    assert_eq!(config.name, "from_yaml");
}

#[test]
fn test_load_from_dir_missing() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        Config::load_from_dir(tmp.path()),
        Err(CoreError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_config_serializes_for_init() {
    let yaml = serde_yaml::to_string(&Config::new("fresh")).unwrap();
    let back: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back.name, "fresh");
    assert_eq!(back.database, DatabaseConfig::default());
}
