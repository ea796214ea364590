//! Fetching raw CSV bytes from a [`SourceLocation`].

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::location::SourceLocation;

/// Options controlling how remote resources are fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Total request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn user_agent() -> String {
    format!("rawdb/{}", env!("CARGO_PKG_VERSION"))
}

/// Read the full body of `location` into memory.
pub fn fetch_bytes(location: &SourceLocation, options: &FetchOptions) -> Result<Vec<u8>> {
    match location {
        SourceLocation::Url(url) => fetch_url(url, options),
        SourceLocation::Path(path) => read_file(path),
    }
}

fn fetch_url(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    debug!(url, timeout = ?options.timeout, "fetching CSV over HTTP");
    let http_error = |source| IngestError::Http {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(http_error)?;

    let response = client
        .get(url)
        .header(USER_AGENT, user_agent())
        .send()
        .map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(http_error)?;
    debug!(url, bytes = body.len(), "downloaded CSV");
    Ok(body.to_vec())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    debug!(path = %path.display(), "reading CSV from disk");
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}
