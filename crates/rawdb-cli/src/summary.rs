use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use rawdb_cli::config::SourceConfig;
use rawdb_cli::pipeline::{IngestReport, SourceStatus, error_chain};

pub fn print_ingest_summary(report: &IngestReport) {
    println!("Database: {}", report.db_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Time"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);

    for (idx, outcome) in report.outcomes.iter().enumerate() {
        let (status, rows, columns) = match &outcome.status {
            SourceStatus::Loaded { rows, columns } => (
                Cell::new("OK").fg(Color::Green),
                Cell::new(rows),
                Cell::new(columns),
            ),
            SourceStatus::Failed(_) => (
                Cell::new("FAILED")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
            ),
            SourceStatus::Skipped => (
                Cell::new("SKIPPED").fg(Color::Yellow),
                dim_cell("-"),
                dim_cell("-"),
            ),
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&outcome.entry.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(outcome.entry.location.to_string()),
            status,
            rows,
            columns,
            dim_cell(format!("{:.1}s", outcome.elapsed.as_secs_f64())),
        ]);
    }
    table.add_row(vec![
        dim_cell(""),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} loaded, {} failed",
            report.loaded_count(),
            report.failed_count()
        ))
        .fg(Color::Cyan),
        dim_cell("-"),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|outcome| match &outcome.status {
            SourceStatus::Failed(error) => Some(error),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for error in failures {
            eprintln!("- {}", error_chain(error));
        }
    }
}

pub fn print_sources(config: &SourceConfig) {
    println!("Database: {}", config.db_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Table"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, entry) in config.sources.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.location.to_string()),
        ]);
    }
    println!("{table}");
}

/// Print a query result, truncated to `limit` rows when given.
pub fn print_frame(df: &DataFrame, limit: Option<usize>) {
    let shown = limit.map_or(df.height(), |n| n.min(df.height()));
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);

    let columns = df.get_columns();
    for row_idx in 0..shown {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| match column.get(row_idx) {
                Ok(AnyValue::Null) | Err(_) => dim_cell("NULL"),
                Ok(value) => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(row);
    }
    println!("{table}");
    if shown < df.height() {
        println!("({} of {} rows shown)", shown, df.height());
    } else {
        println!("({} rows)", df.height());
    }
}

/// Converts a Polars AnyValue to display text.
fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_numeric_trims_trailing_zeros() {
        assert_eq!(format_numeric(2.5), "2.5");
        assert_eq!(format_numeric(3.0), "3");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn any_to_string_renders_scalars() {
        assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
        assert_eq!(any_to_string(AnyValue::String("US_CA")), "US_CA");
        assert_eq!(any_to_string(AnyValue::Float64(0.25)), "0.25");
        assert_eq!(any_to_string(AnyValue::Null), "");
    }
}
