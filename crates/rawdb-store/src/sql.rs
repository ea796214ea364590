//! SQL text for the table replacement sequence.

/// Quote `name` as a SQLite identifier, doubling embedded quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_identifier(table))
}

/// Columns carry no declared type.
pub(crate) fn create_table(table: &str, columns: &[String]) -> String {
    format!(
        "CREATE TABLE {} ({});",
        quote_identifier(table),
        column_list(columns)
    )
}

pub(crate) fn insert_row(table: &str, columns: &[String]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_identifier(table),
        column_list(columns),
        placeholders
    )
}
