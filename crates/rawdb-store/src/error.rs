//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing or reading SQLite tables.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The DataFrame has no columns, so no table schema can be built.
    #[error("cannot write table '{table}': DataFrame has no columns")]
    NoColumns { table: String },

    /// A table name that SQLite cannot accept.
    #[error("invalid table name '{name}'")]
    InvalidIdentifier { name: String },

    /// The database file does not exist (reads never create it).
    #[error("database file not found: {path}")]
    DatabaseNotFound { path: PathBuf },

    /// A SQLite call failed.
    #[error("failed to {context}: {source}")]
    Sqlite {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl StoreError {
    pub(crate) fn sqlite(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Sqlite { context, source }
    }
}

impl From<polars::prelude::PolarsError> for StoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NoColumns {
            table: "idx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot write table 'idx': DataFrame has no columns"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let store_err: StoreError = polars_err.into();
        assert!(matches!(store_err, StoreError::DataFrame { .. }));
    }
}
