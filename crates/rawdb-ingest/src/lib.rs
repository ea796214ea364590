//! CSV ingestion for rawdb.
//!
//! This crate fetches comma-separated resources and parses them into Polars
//! DataFrames. A resource is either an HTTP(S) URL or a local file path.
//!
//! # Features
//!
//! - **Fetching**: blocking HTTP download or local file read
//! - **Parsing**: header row becomes the column names, types are inferred
//!   over the whole file
//!
//! # Example
//!
//! ```ignore
//! use rawdb_ingest::{SourceLocation, load_csv};
//!
//! let location = SourceLocation::from("https://example.org/data.csv");
//! let df = load_csv(&location)?;
//! println!("{} rows", df.height());
//! ```

mod csv;
mod error;
mod fetch;
mod location;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use csv::{load_csv, load_csv_with_options, parse_csv_bytes};
pub use fetch::{FetchOptions, fetch_bytes};

// === Locations ===
pub use location::SourceLocation;
