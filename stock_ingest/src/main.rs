//! Stock ingestion run.
//!
//! One invocation ingests one batch of stock quotes:
//!
//! - load the quote batch from the feed (`feed`);
//! - read the last recorded update per code from the store (`store`);
//! - classify the batch into Active / New / Stale and rank the Active quotes into
//!   top gainers and losers (`stock_common::aggregate`);
//! - persist the Active quotes and refresh the last-update view;
//! - log a summary of the run and hand it to the notifier (`notifier`).
//!
//! A malformed timestamp stops the run before anything is written. A failed
//! insert is reported in the summary and fails the run once the report is out.
#![warn(missing_docs)]
use clap::Parser;
use log::info;
use stock_common::report::{Report, ReportFormat};
use stock_common::{Aggregator, Classifier, IngestError, Quote, Result, TimestampFormats};

use crate::args::Args;
use crate::notifier::{FileNotifier, LogNotifier, Notifier, Summary};
use crate::store::{JsonStore, LastUpdateRepository, QuoteRepository};

mod args;
mod feed;
mod notifier;
mod store;

/// Per-run knobs that do not belong to the store or the notifier.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Skip writing to the store.
    pub dry_run: bool,
    /// Summary rendering.
    pub report_format: ReportFormat,
}

/// Ingest `quotes` into `store`, writing the run report to `summary`.
///
/// Returns the report of a completed run. Classification failures abort before
/// any write; store failures are returned once the report is in `summary`.
pub fn ingest<S>(
    quotes: &[Quote],
    store: &mut S,
    aggregator: &Aggregator,
    options: RunOptions,
    summary: &mut Summary,
) -> Result<Report>
where
    S: QuoteRepository + LastUpdateRepository,
{
    let last_updates = store.get()?;
    info!(
        "Loaded {} quotes and {} previous updates",
        quotes.len(),
        last_updates.len()
    );

    let res = aggregator.aggregate(quotes, &last_updates)?;

    let stored = if options.dry_run {
        info!("Dry run: {} active quotes not stored", res.active.len());
        Ok(())
    } else if res.active.is_empty() {
        Ok(())
    } else {
        ingest_stocks(&res.active, store)
    };

    let report = Report::new(quotes.len(), &res);
    match options.report_format {
        ReportFormat::Text => report.lines().into_iter().for_each(|line| summary.info(line)),
        ReportFormat::Json => summary.info(report.render(ReportFormat::Json)?),
    }

    stored.map(|_| report)
}

fn ingest_stocks<S>(quotes: &[Quote], store: &mut S) -> Result<()>
where
    S: QuoteRepository + LastUpdateRepository,
{
    let inserted = store.insert(quotes)?;
    if inserted < quotes.len() {
        return Err(IngestError::InsertShortfall {
            inserted,
            expected: quotes.len(),
        });
    }
    store.refresh()
}

fn run(args: &Args, summary: &mut Summary) -> Result<Report> {
    let formats = TimestampFormats::default();
    let aggregator = Aggregator::new(Classifier::new(formats.clone()), args.num_of_top_rank);
    let mut store = JsonStore::open(&args.store_dir, formats)?;
    info!("Using store at {}", store.dir().display());

    let quotes = feed::load_quotes(&args.feed)?;
    let options = RunOptions {
        dry_run: args.dry_run,
        report_format: args.report_format,
    };
    ingest(&quotes, &mut store, &aggregator, options, summary)
}

fn main() -> Result<(), IngestError> {
    init_logger();
    let args = Args::parse();
    let notifier: Box<dyn Notifier> = match &args.notify_file {
        Some(path) => Box::new(FileNotifier::new(path)),
        None => Box::new(LogNotifier),
    };

    let mut summary = Summary::default();
    let res = run(&args, &mut summary);
    if let Err(e) = &res {
        summary.error(e.to_string());
    }
    summary.send(notifier.as_ref());

    res.map(|_| ())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
