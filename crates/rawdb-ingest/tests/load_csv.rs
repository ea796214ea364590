use std::fs;
use std::path::PathBuf;

use rawdb_ingest::{IngestError, SourceLocation, load_csv};

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_local_csv_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "t.csv", "a,b\n1,x\n2,y\n");

    let df = load_csv(&SourceLocation::from(path)).expect("load csv");

    assert_eq!(df.width(), 2);
    assert_eq!(df.height(), 2);
    let a: Vec<Option<i64>> = df.column("a").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(a, vec![Some(1), Some(2)]);
    let b: Vec<Option<&str>> = df.column("b").unwrap().str().unwrap().into_iter().collect();
    assert_eq!(b, vec![Some("x"), Some("y")]);
}

#[test]
fn location_parsed_from_string_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "demographics.csv", "location_key,population\nUS,331\n");
    let text = path.to_str().unwrap().to_string();

    let df = load_csv(&SourceLocation::from(text)).expect("load csv");
    assert_eq!(df.height(), 1);
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let location = SourceLocation::from(dir.path().join("absent.csv"));

    let err = load_csv(&location).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "empty.csv", "");

    let err = load_csv(&SourceLocation::from(path)).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}
