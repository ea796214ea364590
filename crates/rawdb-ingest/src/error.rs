//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or parsing a CSV resource.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Network Errors ===
    /// The HTTP request could not be sent or the body could not be read.
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The resource has no content at all.
    #[error("CSV resource is empty: {location}")]
    EmptyCsv { location: String },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {location}: {message}")]
    CsvParse { location: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");

        let err = IngestError::HttpStatus {
            url: "https://example.org/a.csv".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "fetching https://example.org/a.csv returned HTTP 404"
        );
    }
}
