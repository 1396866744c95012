//! CLI argument definitions for the restaurant ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "resto",
    version,
    about = "Restaurant ETL - clean raw exports and derive analytics",
    long_about = "Clean raw customer, order and support-ticket exports into silver tables\n\
                  and derive gold analytics (average order value, tickets per order,\n\
                  total revenue)."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run ingest, normalize, analyze and output over a data directory.
    Run(RunArgs),

    /// List the dataset catalog.
    Datasets,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding the raw exports.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for silver and gold tables (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File format for written tables.
    #[arg(long = "format", value_enum, default_value = "parquet")]
    pub format: OutputFormatArg,

    /// Run every stage but write nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Customers CSV file name inside DATA_DIR.
    #[arg(long = "customers", value_name = "FILE")]
    pub customers: Option<String>,

    /// Orders CSV file name inside DATA_DIR.
    #[arg(long = "orders", value_name = "FILE")]
    pub orders: Option<String>,

    /// Tickets JSON-lines file name inside DATA_DIR.
    #[arg(long = "tickets", value_name = "FILE")]
    pub tickets: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Parquet,
    Csv,
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
