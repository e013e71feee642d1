//! Command-line arguments for the ingestion run.
//!
//! Every option can also be supplied through the environment, so the binary can
//! be scheduled with nothing but env vars set.
use std::path::PathBuf;

use clap::Parser;
use stock_common::report::ReportFormat;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON array of stock quotes to ingest, or `-` for stdin.
    #[arg(long, env = "STOCK_FEED")]
    pub feed: String,

    /// Directory holding the stored quotes and the last-update view.
    #[arg(long, env = "STOCK_STORE_DIR", default_value = "./store")]
    pub store_dir: PathBuf,

    /// How many top gainers and losers to report.
    #[arg(long, env = "NUM_OF_TOP_RANK")]
    pub num_of_top_rank: usize,

    /// Append the run summary to this file instead of logging it.
    #[arg(long, env = "STOCK_NOTIFY_FILE")]
    pub notify_file: Option<PathBuf>,

    /// Summary rendering.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report_format: ReportFormat,

    /// Classify and report without writing to the store.
    #[arg(long)]
    pub dry_run: bool,
}
