//!
//! Classification and ranking core shared by the stock ingestion tools.
//!
//! This crate aggregates:
//! - `error` — `TimestampParseError`, `ClassifyError` and the run-wide `IngestError`.
//! - `result` — handy `Result<T, IngestError>` alias.
//! - `quote` — `Quote` and `LastUpdate` records plus timestamp formats.
//! - `toplist` — bounded, comparator-ordered `TopList`.
//! - `filter` — Active / New / Stale `Classifier`.
//! - `aggregate` — classification plus top gainers / losers.
//! - `report` — run summary rendering.
#![warn(missing_docs)]
pub mod aggregate;
pub mod error;
pub mod filter;
pub mod quote;
pub mod report;
pub mod result;
pub mod toplist;

pub use aggregate::{AggregateResult, Aggregator, aggregate};
pub use error::{ClassifyError, IngestError, TimestampParseError};
pub use filter::{Classification, Classifier};
pub use quote::{LastUpdate, Quote, TimestampFormats};
pub use result::Result;
pub use toplist::TopList;
