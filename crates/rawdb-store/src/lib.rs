//! SQLite persistence for rawdb.
//!
//! Two operations move data between Polars DataFrames and a SQLite file:
//!
//! - [`write_table`] drops and recreates a table from a DataFrame, inside a
//!   single transaction
//! - [`read_query`] runs a query verbatim and collects the result into a
//!   DataFrame
//!
//! Tables are created without declared column types, so every value keeps
//! the storage class it was inserted with.
//!
//! # Example
//!
//! ```ignore
//! use rawdb_store::{DEFAULT_DB_PATH, read_query, write_table};
//!
//! write_table(&df, "idx", DEFAULT_DB_PATH)?;
//! let result = read_query("SELECT COUNT(*) AS n FROM idx", DEFAULT_DB_PATH)?;
//! ```

mod error;
mod reader;
mod sql;
mod value;
mod writer;

/// Database file used when the caller does not name one.
pub const DEFAULT_DB_PATH: &str = "raw.db";

pub use error::{Result, StoreError};
pub use reader::read_query;
pub use sql::quote_identifier;
pub use writer::write_table;
