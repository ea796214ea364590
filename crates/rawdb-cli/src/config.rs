//! Source mapping configuration.
//!
//! The mapping is an explicit value handed to the driver. The built-in
//! default points at the COVID-19 Open Data v3 tables; a JSON file can
//! replace it:
//!
//! ```json
//! {
//!   "db_path": "raw.db",
//!   "sources": [
//!     { "location": "https://example.org/index.csv", "table": "idx" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use rawdb_ingest::SourceLocation;
use rawdb_store::DEFAULT_DB_PATH;

/// Built-in (location, table) pairs, in ingestion order.
pub const DEFAULT_SOURCES: [(&str, &str); 3] = [
    (
        "https://storage.googleapis.com/covid19-open-data/v3/index.csv",
        "idx",
    ),
    (
        "https://storage.googleapis.com/covid19-open-data/v3/demographics.csv",
        "demographics",
    ),
    (
        "https://storage.googleapis.com/covid19-open-data/v3/hospitalizations.csv",
        "hospitalizations",
    ),
];

/// One source to ingest and the table it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub location: SourceLocation,
    pub table: String,
}

impl SourceEntry {
    pub fn new(location: impl Into<SourceLocation>, table: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            table: table.into(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

/// Database target plus the ordered source mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    pub sources: Vec<SourceEntry>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(location, table)| SourceEntry::new(*location, *table))
                .collect(),
        }
    }
}

impl SourceConfig {
    pub fn new(db_path: impl Into<PathBuf>, sources: Vec<SourceEntry>) -> Self {
        Self {
            db_path: db_path.into(),
            sources,
        }
    }

    /// Replace the database path.
    #[must_use]
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Parse a JSON sources document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse sources JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON sources file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read sources file: {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load sources: {}", path.display()))
    }

    /// Table names must be non-empty.
    pub fn validate(&self) -> Result<()> {
        for (idx, entry) in self.sources.iter().enumerate() {
            if entry.table.trim().is_empty() {
                bail!("source #{} ({}) has an empty table name", idx + 1, entry.location);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_has_three_sources_in_order() {
        let config = SourceConfig::default();
        let tables: Vec<&str> = config.sources.iter().map(|s| s.table.as_str()).collect();

        assert_eq!(tables, vec!["idx", "demographics", "hospitalizations"]);
        assert_eq!(config.db_path, PathBuf::from("raw.db"));
        assert!(config.sources.iter().all(|s| s.location.is_remote()));
    }

    #[test]
    fn parses_json_with_default_db_path() {
        let config = SourceConfig::from_json_str(
            r#"{"sources": [
                {"location": "data/index.csv", "table": "idx"},
                {"location": "https://example.org/d.csv", "table": "demographics"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("raw.db"));
        assert_eq!(
            config.sources[0].location,
            SourceLocation::Path(PathBuf::from("data/index.csv"))
        );
        assert!(config.sources[1].location.is_remote());
    }

    #[test]
    fn json_db_path_is_used() {
        let config =
            SourceConfig::from_json_str(r#"{"db_path": "other.db", "sources": []}"#).unwrap();
        assert_eq!(config.db_path, PathBuf::from("other.db"));
    }

    #[test]
    fn rejects_empty_table_name() {
        let result = SourceConfig::from_json_str(
            r#"{"sources": [{"location": "a.csv", "table": " "}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_sources_key() {
        assert!(SourceConfig::from_json_str(r#"{"db_path": "x.db"}"#).is_err());
    }
}
