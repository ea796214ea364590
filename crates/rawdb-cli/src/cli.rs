//! CLI argument definitions for rawdb.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rawdb",
    version,
    about = "Load CSV datasets into a local SQLite database and query them",
    long_about = "Download the configured CSV sources, replace one SQLite table per source,\n\
                  and run ad-hoc SQL against the resulting database."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps (always present in JSON output).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download every configured source and replace its table.
    Ingest(IngestArgs),

    /// Run a SQL query against the database and print the result.
    Query(QueryArgs),

    /// List the configured sources.
    Sources(SourcesArgs),
}

#[derive(Args)]
pub struct SourcesArgs {
    /// JSON file replacing the built-in source mapping.
    #[arg(long = "sources", value_name = "FILE")]
    pub sources_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct IngestArgs {
    #[command(flatten)]
    pub sources: SourcesArgs,

    /// Database file (default: raw.db, or db_path from the sources file).
    #[arg(long = "db", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Continue with the remaining sources after one fails.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// HTTP request timeout in seconds (no timeout by default).
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// SQL to execute verbatim.
    #[arg(value_name = "SQL")]
    pub sql: String,

    /// Database file.
    #[arg(long = "db", value_name = "PATH", default_value = rawdb_store::DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Print at most this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
