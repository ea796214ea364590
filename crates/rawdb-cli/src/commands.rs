use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use rawdb_cli::config::SourceConfig;
use rawdb_cli::pipeline::{IngestOptions, IngestReport, run_sources as run_configured_sources};
use rawdb_ingest::FetchOptions;
use rawdb_store::read_query;

use crate::cli::{IngestArgs, QueryArgs, SourcesArgs};
use crate::summary::{print_frame, print_sources};

fn load_config(args: &SourcesArgs) -> Result<SourceConfig> {
    match &args.sources_file {
        Some(path) => SourceConfig::from_json_file(path),
        None => Ok(SourceConfig::default()),
    }
}

pub fn run_ingest(args: &IngestArgs) -> Result<IngestReport> {
    let mut config = load_config(&args.sources)?;
    if let Some(db_path) = &args.db_path {
        config = config.with_db_path(db_path);
    }
    let options = IngestOptions {
        fail_fast: !args.keep_going,
        fetch: FetchOptions::default().with_timeout(args.timeout_secs.map(Duration::from_secs)),
    };

    let span = info_span!("ingest", db = %config.db_path.display());
    let _guard = span.enter();
    info!(sources = config.sources.len(), "starting ingest");
    let start = Instant::now();
    let report = run_configured_sources(&config, &options);
    info!(
        loaded = report.loaded_count(),
        failed = report.failed_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "ingest finished"
    );
    Ok(report)
}

pub fn run_query(args: &QueryArgs) -> Result<()> {
    debug!(db = %args.db_path.display(), "running query");
    let df = read_query(&args.sql, &args.db_path)
        .with_context(|| format!("query {}", args.db_path.display()))?;
    print_frame(&df, args.limit);
    Ok(())
}

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let config = load_config(args)?;
    print_sources(&config);
    Ok(())
}
