use super::*;
use tempfile::TempDir;

#[test]
fn test_known_versions_ignores_other_files() {
    let tmp = TempDir::new().unwrap();
    for name in ["0.sql", "1.sql", "10.sql", "README.md", "02.sql", "draft.sql"] {
        std::fs::write(tmp.path().join(name), "").unwrap();
    }
    std::fs::create_dir(tmp.path().join("3.sql")).unwrap();

    let files = FsMigrationFiles::new(tmp.path());
    let versions: Vec<_> = files.known_versions().unwrap().into_iter().collect();
    assert_eq!(versions, vec![0, 1, 10]);
}

#[test]
fn test_known_versions_missing_dir() {
    let tmp = TempDir::new().unwrap();
    let files = FsMigrationFiles::new(tmp.path().join("nope"));
    assert!(matches!(
        files.known_versions(),
        Err(CoreError::MigrationsDirNotFound { .. })
    ));
}

#[test]
fn test_write_then_read_strips_blank_lines() {
    let tmp = TempDir::new().unwrap();
    let files = FsMigrationFiles::new(tmp.path().join("migrations"));

    files
        .write_file(4, "-- header\n\nSELECT 1;\n   \nSELECT 2;\n")
        .unwrap();

    assert!(files.file_exists(4));
    assert!(!files.file_exists(5));
    assert_eq!(
        files.read_file(4).unwrap(),
        vec!["-- header", "SELECT 1;", "SELECT 2;"]
    );
    assert_eq!(files.path_for(4), tmp.path().join("migrations").join("4.sql"));
}

#[test]
fn test_read_missing_file() {
    let tmp = TempDir::new().unwrap();
    let files = FsMigrationFiles::new(tmp.path());
    assert!(matches!(
        files.read_file(7),
        Err(CoreError::MissingMigrationFile { version: 7 })
    ));
}
