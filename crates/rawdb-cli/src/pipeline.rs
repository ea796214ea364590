//! The ingestion driver: load each configured source and write its table.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info, info_span, warn};

use rawdb_ingest::{FetchOptions, IngestError, load_csv_with_options};
use rawdb_store::{StoreError, write_table};

use crate::config::{SourceConfig, SourceEntry};

/// Failure of a single source, tagged with its destination table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to load '{location}' for table '{table}'")]
    Load {
        table: String,
        location: String,
        #[source]
        source: IngestError,
    },

    #[error("failed to write table '{table}'")]
    Write {
        table: String,
        #[source]
        source: StoreError,
    },
}

/// Options for a driver run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Stop at the first failing source; later sources are skipped.
    pub fail_fast: bool,
    pub fetch: FetchOptions,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            fail_fast: true,
            fetch: FetchOptions::default(),
        }
    }
}

#[derive(Debug)]
pub enum SourceStatus {
    Loaded { rows: usize, columns: usize },
    Failed(SourceError),
    /// Not attempted because an earlier source failed.
    Skipped,
}

#[derive(Debug)]
pub struct SourceOutcome {
    pub entry: SourceEntry,
    pub status: SourceStatus,
    pub elapsed: Duration,
}

impl SourceOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, SourceStatus::Failed(_))
    }
}

/// One outcome per configured source, in configuration order.
#[derive(Debug)]
pub struct IngestReport {
    pub db_path: PathBuf,
    pub outcomes: Vec<SourceOutcome>,
}

impl IngestReport {
    /// True when every source was loaded.
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| matches!(outcome.status, SourceStatus::Loaded { .. }))
    }

    /// Index and outcome of the first failed source.
    pub fn first_failure(&self) -> Option<(usize, &SourceOutcome)> {
        self.outcomes
            .iter()
            .enumerate()
            .find(|(_, outcome)| outcome.is_failed())
    }

    pub fn loaded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, SourceStatus::Loaded { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match outcome.status {
                SourceStatus::Loaded { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    /// Convert into a `Result` carrying the first failure, if any.
    pub fn into_result(self) -> Result<Self, SourceError> {
        let Self { db_path, outcomes } = self;
        let mut kept = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome.status {
                SourceStatus::Failed(error) => return Err(error),
                status => kept.push(SourceOutcome { status, ..outcome }),
            }
        }
        Ok(Self {
            db_path,
            outcomes: kept,
        })
    }
}

/// Load one source and replace its table. Returns (rows, columns).
pub fn ingest_source(
    entry: &SourceEntry,
    db_path: &Path,
    fetch: &FetchOptions,
) -> Result<(usize, usize), SourceError> {
    let df = load_csv_with_options(&entry.location, fetch).map_err(|source| SourceError::Load {
        table: entry.table.clone(),
        location: entry.location.to_string(),
        source,
    })?;
    let rows = write_table(&df, &entry.table, db_path).map_err(|source| SourceError::Write {
        table: entry.table.clone(),
        source,
    })?;
    Ok((rows, df.width()))
}

/// Run every source of `config` in order.
pub fn run_sources(config: &SourceConfig, options: &IngestOptions) -> IngestReport {
    let mut outcomes = Vec::with_capacity(config.sources.len());
    let mut halted = false;

    for entry in &config.sources {
        let span = info_span!("source", table = %entry.table);
        let _guard = span.enter();

        if halted {
            warn!(location = %entry.location, "skipped after earlier failure");
            outcomes.push(SourceOutcome {
                entry: entry.clone(),
                status: SourceStatus::Skipped,
                elapsed: Duration::ZERO,
            });
            continue;
        }

        let start = Instant::now();
        let status = match ingest_source(entry, &config.db_path, &options.fetch) {
            Ok((rows, columns)) => {
                info!(rows, columns, "source ingested");
                SourceStatus::Loaded { rows, columns }
            }
            Err(err) => {
                error!(error = %error_chain(&err), "source failed");
                halted = options.fail_fast;
                SourceStatus::Failed(err)
            }
        };
        outcomes.push(SourceOutcome {
            entry: entry.clone(),
            status,
            elapsed: start.elapsed(),
        });
    }

    IngestReport {
        db_path: config.db_path.clone(),
        outcomes,
    }
}

/// Render an error and its sources as `a: b: c`.
///
/// A cause already printed at the end of its parent's message is not
/// repeated.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
