//! CSV parsing into Polars DataFrames.

use std::io::Cursor;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::fetch::{FetchOptions, fetch_bytes};
use crate::location::SourceLocation;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load the CSV at `location` with default fetch options.
pub fn load_csv(location: &SourceLocation) -> Result<DataFrame> {
    load_csv_with_options(location, &FetchOptions::default())
}

/// Load the CSV at `location`.
///
/// The first record is the header row; column types are inferred over the
/// whole file. Nothing is retried and no partial frame is returned.
pub fn load_csv_with_options(
    location: &SourceLocation,
    options: &FetchOptions,
) -> Result<DataFrame> {
    let bytes = fetch_bytes(location, options)?;
    let df = parse_csv_bytes(bytes, &location.to_string())?;
    info!(
        location = %location,
        rows = df.height(),
        columns = df.width(),
        "loaded CSV"
    );
    Ok(df)
}

/// Parse an in-memory CSV body. `label` is only used in error messages.
pub fn parse_csv_bytes(mut bytes: Vec<u8>, label: &str) -> Result<DataFrame> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            location: label.to_string(),
        });
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            location: label.to_string(),
            message: e.to_string(),
        })
}
