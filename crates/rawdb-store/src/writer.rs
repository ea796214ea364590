//! Replacing a SQLite table with the contents of a DataFrame.

use std::path::Path;

use polars::prelude::DataFrame;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, info_span};

use crate::error::{Result, StoreError};
use crate::sql;
use crate::value::any_to_sql;

/// Replace table `table` in the database at `db_path` with the rows of `df`.
///
/// The file is created if absent. Drop, create and insert run in one
/// transaction: on any failure the transaction is rolled back and the
/// previous table, if there was one, is left untouched. Returns the number
/// of rows inserted.
pub fn write_table(df: &DataFrame, table: &str, db_path: impl AsRef<Path>) -> Result<usize> {
    let db_path = db_path.as_ref();
    let span = info_span!("write_table", table, db = %db_path.display());
    let _guard = span.enter();

    if table.trim().is_empty() {
        return Err(StoreError::InvalidIdentifier {
            name: table.to_string(),
        });
    }
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if columns.is_empty() {
        return Err(StoreError::NoColumns {
            table: table.to_string(),
        });
    }

    let mut conn = Connection::open(db_path).map_err(StoreError::sqlite("open database"))?;
    let rows = replace_table(&mut conn, df, table, &columns)?;
    conn.close().map_err(|(_, source)| StoreError::Sqlite {
        context: "close database",
        source,
    })?;

    info!(rows, columns = columns.len(), "table written");
    Ok(rows)
}

fn replace_table(
    conn: &mut Connection,
    df: &DataFrame,
    table: &str,
    columns: &[String],
) -> Result<usize> {
    // Dropping an uncommitted transaction rolls it back.
    let tx = conn
        .transaction()
        .map_err(StoreError::sqlite("begin transaction"))?;

    debug!("dropping existing table");
    tx.execute_batch(&sql::drop_table(table))
        .map_err(StoreError::sqlite("drop table"))?;

    debug!(columns = columns.len(), "creating table");
    tx.execute_batch(&sql::create_table(table, columns))
        .map_err(StoreError::sqlite("create table"))?;

    let height = df.height();
    {
        let mut stmt = tx
            .prepare(&sql::insert_row(table, columns))
            .map_err(StoreError::sqlite("prepare insert"))?;
        let source_columns = df.get_columns();
        let mut values = Vec::with_capacity(source_columns.len());
        for row_idx in 0..height {
            values.clear();
            for column in source_columns {
                values.push(any_to_sql(column.get(row_idx)?));
            }
            stmt.execute(params_from_iter(values.iter()))
                .map_err(StoreError::sqlite("insert row"))?;
        }
    }

    tx.commit().map_err(StoreError::sqlite("commit"))?;
    Ok(height)
}
