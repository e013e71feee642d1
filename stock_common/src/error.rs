//! Error types shared by the core and the ingestion binary.
//!
//! `TimestampParseError` is the only failure the classification core can raise.
//! `ClassifyError` wraps it together with the partial classification built before
//! the offending quote. `IngestError` unifies those with I/O and serialization
//! failures of the surrounding run, allowing crates to propagate a single error type.
use std::io;

use strum::Display;
use thiserror::Error;

use crate::filter::Classification;

/// Which side of the comparison carried the malformed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TimestampKind {
    /// `LastUpdate` of an incoming quote.
    Quote,
    /// `LastUpdate` of a previously recorded update.
    Previous,
}

/// A `LastUpdate` string did not match its expected format.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {kind} timestamp for {code}: {value:?} ({source})")]
pub struct TimestampParseError {
    /// Code of the quote (or record) holding the bad value.
    pub code: String,
    /// The raw string that failed to parse.
    pub value: String,
    /// Which side failed.
    pub kind: TimestampKind,
    /// Underlying chrono failure.
    #[source]
    pub source: chrono::ParseError,
}

/// Classification stopped at a malformed timestamp.
///
/// `partial` holds every quote classified before the failing one, so callers can
/// still use it for already-processed quotes.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Classification stopped after {} quotes: {source}", .partial.classified())]
pub struct ClassifyError {
    /// Active/New/Stale accumulated up to, not including, the failing quote.
    pub partial: Classification,
    /// The parse failure that stopped processing.
    #[source]
    pub source: TimestampParseError,
}

/// Unified error type for an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// I/O error originating from the standard library (feed, store, outbox files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The batch could not be classified.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// A standalone timestamp failure outside classification (e.g. refreshing the view).
    #[error(transparent)]
    Timestamp(#[from] TimestampParseError),

    /// The store accepted fewer quotes than it was handed.
    #[error("Number of inserted {inserted} is less than active stocks {expected}")]
    InsertShortfall {
        /// Rows actually stored.
        inserted: usize,
        /// Active quotes handed to the store.
        expected: usize,
    },
}
