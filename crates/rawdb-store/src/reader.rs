//! Running a query and collecting the result into a DataFrame.

use std::collections::HashSet;
use std::path::Path;

use polars::prelude::{Column, DataFrame};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::value::sql_column;

/// Execute `query` verbatim against the database at `db_path`.
///
/// The database must already exist. Column order follows the query; a name
/// the result repeats gets a `_1`, `_2`, ... suffix on its later occurrences.
/// A column holding only integers is Int64, integers and reals Float64,
/// anything else String. The connection is closed on every return path.
pub fn read_query(query: &str, db_path: impl AsRef<Path>) -> Result<DataFrame> {
    let db_path = db_path.as_ref();
    if !db_path.exists() {
        return Err(StoreError::DatabaseNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(StoreError::sqlite("open database"))?;

    let (names, columns) = collect_columns(&conn, query)?;
    drop(conn);

    let columns: Vec<Column> = unique_names(names)
        .iter()
        .zip(&columns)
        .map(|(name, values)| sql_column(name, values))
        .collect();
    let df = DataFrame::new(columns)?;
    debug!(
        query_len = query.len(),
        rows = df.height(),
        columns = df.width(),
        "query executed"
    );
    Ok(df)
}

/// Suffixes repeated names so every column is addressable, keeping order.
fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

/// Column names plus column-major values for every result row.
fn collect_columns(conn: &Connection, query: &str) -> Result<(Vec<String>, Vec<Vec<SqlValue>>)> {
    let mut stmt = conn
        .prepare(query)
        .map_err(StoreError::sqlite("prepare query"))?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = names.len();

    let mut columns: Vec<Vec<SqlValue>> = vec![Vec::new(); width];
    let mut rows = stmt.query([]).map_err(StoreError::sqlite("execute query"))?;
    while let Some(row) = rows.next().map_err(StoreError::sqlite("fetch row"))? {
        for (idx, column) in columns.iter_mut().enumerate() {
            let value: SqlValue = row.get(idx).map_err(StoreError::sqlite("read value"))?;
            column.push(value);
        }
    }
    Ok((names, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("raw.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE t (a, b);
             INSERT INTO t VALUES (1, 'x');
             INSERT INTO t VALUES (2, 'y');",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_reads_rows_and_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let df = read_query("SELECT b, a FROM t ORDER BY a", &db).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_aliases_name_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let df = read_query("SELECT COUNT(*) AS n FROM t", &db).unwrap();

        let n: Vec<Option<i64>> = df.column("n").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(n, vec![Some(2)]);
    }

    #[test]
    fn test_empty_result_keeps_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let df = read_query("SELECT a, b FROM t WHERE a > 100", &db).unwrap();

        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 0);
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn test_join_with_shared_key_keeps_both_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("raw.db");
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE idx (location_key, country_name);
             INSERT INTO idx VALUES ('US', 'United States');
             CREATE TABLE demographics (location_key, population);
             INSERT INTO demographics VALUES ('US', 331002651);",
        )
        .unwrap();
        drop(conn);

        let df = read_query(
            "SELECT * FROM idx i JOIN demographics d ON i.location_key = d.location_key",
            &db,
        )
        .unwrap();

        assert_eq!(
            column_names(&df),
            vec!["location_key", "country_name", "location_key_1", "population"]
        );
        let right: Vec<Option<&str>> = df
            .column("location_key_1")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(right, vec![Some("US")]);
    }

    #[test]
    fn test_repeated_expression_names_are_suffixed() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let df = read_query("SELECT 1, 1, 1", &db).unwrap();

        assert_eq!(column_names(&df), vec!["1", "1_1", "1_2"]);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_suffix_skips_names_already_present() {
        let names = vec!["a".to_string(), "a_1".to_string(), "a".to_string()];
        assert_eq!(unique_names(names), vec!["a", "a_1", "a_2"]);
    }

    #[test]
    fn test_missing_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let result = read_query("SELECT * FROM nope", &db);

        assert!(matches!(result, Err(StoreError::Sqlite { .. })));
    }

    #[test]
    fn test_syntax_error_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        assert!(read_query("SELEC * FROM t", &db).is_err());
    }

    #[test]
    fn test_missing_database_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("absent.db");

        let result = read_query("SELECT 1", &db);

        assert!(matches!(result, Err(StoreError::DatabaseNotFound { .. })));
        assert!(!db.exists());
    }
}
