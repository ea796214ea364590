//! Source locations: remote URLs or local paths.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a CSV resource lives.
///
/// Strings starting with `http://` or `https://` (case-insensitive) are URLs,
/// anything else is treated as a filesystem path. Surrounding whitespace is
/// trimmed either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceLocation {
    /// Remote resource fetched over HTTP(S).
    Url(String),
    /// File on the local filesystem.
    Path(PathBuf),
}

impl SourceLocation {
    /// Returns true if this location is fetched over the network.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

fn is_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl From<&str> for SourceLocation {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if is_url(value) {
            Self::Url(value.to_string())
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

impl From<String> for SourceLocation {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PathBuf> for SourceLocation {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<SourceLocation> for String {
    fn from(value: SourceLocation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
