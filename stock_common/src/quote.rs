//! Stock quote data model and timestamp helpers.
//!
//! A `Quote` is one decoded snapshot from the stock feed. Only `code`,
//! `last_update` and `gain` drive classification and ranking; the remaining
//! market fields are carried through untouched for persistence. `LastUpdate` is
//! the most recent update recorded for a code before the current batch.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{TimestampKind, TimestampParseError};

/// Format of `Quote::last_update` as delivered by the feed.
pub const QUOTE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Format of `LastUpdate::last_update` as stored.
pub const PREVIOUS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Market quote for a single stock.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Company name.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Stock code, unique within a batch.
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "StockSubSectorId", default)]
    pub sub_sector_id: u32,
    #[serde(rename = "SubSectorName", default)]
    pub sub_sector_name: String,
    #[serde(rename = "StockSectorId", default)]
    pub sector_id: u32,
    #[serde(rename = "SectorName", default)]
    pub sector_name: String,
    /// Last traded price.
    #[serde(rename = "Last", default)]
    pub last: f32,
    #[serde(rename = "PrevClosingPrice", default)]
    pub prev_closing_price: f32,
    #[serde(rename = "AdjustedOpenPrice", default)]
    pub adjusted_open_price: f32,
    #[serde(rename = "AdjustedHighPrice", default)]
    pub adjusted_high_price: f32,
    #[serde(rename = "AdjustedLowPrice", default)]
    pub adjusted_low_price: f32,
    #[serde(rename = "Volume", default)]
    pub volume: f64,
    #[serde(rename = "Frequency", default)]
    pub frequency: f64,
    #[serde(rename = "Value", default)]
    pub value: f64,
    /// Signed one-day change, the ranking metric for gainers and losers.
    #[serde(rename = "OneDay", default)]
    pub gain: f64,
    /// Update time in `QUOTE_TIME_FORMAT`.
    #[serde(rename = "LastUpdate")]
    pub last_update: String,
}

impl Quote {
    /// Build a quote carrying only the fields the core looks at.
    pub fn new(code: &str, last_update: &str, gain: f64) -> Self {
        Quote {
            code: String::from(code),
            last_update: String::from(last_update),
            gain,
            ..Default::default()
        }
    }
}

/// Last recorded update for a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdate {
    /// Stock code.
    #[serde(rename = "Code")]
    pub code: String,
    /// Update time in `PREVIOUS_TIME_FORMAT`.
    #[serde(rename = "LastUpdate")]
    pub last_update: String,
}

impl LastUpdate {
    /// Build a record from its two fields.
    pub fn new(code: &str, last_update: &str) -> Self {
        LastUpdate {
            code: String::from(code),
            last_update: String::from(last_update),
        }
    }
}

/// The pair of chrono formats used to read quote and previous timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormats {
    /// Format of `Quote::last_update`.
    pub quote: String,
    /// Format of `LastUpdate::last_update`.
    pub previous: String,
}

impl Default for TimestampFormats {
    fn default() -> Self {
        TimestampFormats {
            quote: String::from(QUOTE_TIME_FORMAT),
            previous: String::from(PREVIOUS_TIME_FORMAT),
        }
    }
}

impl TimestampFormats {
    /// Parse a quote's `LastUpdate`.
    pub fn parse_quote(&self, code: &str, value: &str) -> Result<NaiveDateTime, TimestampParseError> {
        parse(code, value, &self.quote, TimestampKind::Quote)
    }

    /// Parse a recorded `LastUpdate`.
    pub fn parse_previous(
        &self,
        code: &str,
        value: &str,
    ) -> Result<NaiveDateTime, TimestampParseError> {
        parse(code, value, &self.previous, TimestampKind::Previous)
    }

    /// Render a timestamp the way previous-update records store it.
    pub fn format_previous(&self, at: &NaiveDateTime) -> String {
        at.format(&self.previous).to_string()
    }
}

fn parse(
    code: &str,
    value: &str,
    format: &str,
    kind: TimestampKind,
) -> Result<NaiveDateTime, TimestampParseError> {
    NaiveDateTime::parse_from_str(value, format).map_err(|source| TimestampParseError {
        code: String::from(code),
        value: String::from(value),
        kind,
        source,
    })
}
