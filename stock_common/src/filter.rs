//! Active / New / Stale classification of a quote batch.
//!
//! Each quote is compared against the last recorded update for its code:
//! - no record: the quote is New, and therefore Active;
//! - quote timestamp strictly after the record: Active;
//! - otherwise: Stale.
//!
//! Input order is kept in every bucket. An empty history short-circuits to "all
//! quotes are New and Active" without parsing a single timestamp.
use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::error::ClassifyError;
use crate::quote::{LastUpdate, Quote, TimestampFormats};

/// Outcome of classifying a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    /// Quotes carrying newer data than what is on record, including all New ones.
    pub active: Vec<Quote>,
    /// Quotes whose code has no previous record.
    pub new: Vec<Quote>,
    /// Quotes not newer than their record.
    pub stale: Vec<Quote>,
}

impl Classification {
    /// Number of input quotes placed in Active or Stale.
    pub fn classified(&self) -> usize {
        self.active.len() + self.stale.len()
    }
}

/// Splits quote batches using a fixed pair of timestamp formats.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    formats: TimestampFormats,
}

impl Classifier {
    /// Create a classifier reading timestamps with `formats`.
    pub fn new(formats: TimestampFormats) -> Self {
        Self { formats }
    }

    /// Timestamp formats in use.
    pub fn formats(&self) -> &TimestampFormats {
        &self.formats
    }

    /// Classify `quotes` against `previous`.
    ///
    /// Stops at the first timestamp that fails to parse; the error carries what
    /// was classified before that quote.
    pub fn classify(
        &self,
        quotes: &[Quote],
        previous: &[LastUpdate],
    ) -> Result<Classification, ClassifyError> {
        if previous.is_empty() {
            debug!("No previous updates, {} quotes are all new", quotes.len());
            return Ok(Classification {
                active: quotes.to_vec(),
                new: quotes.to_vec(),
                stale: Vec::new(),
            });
        }

        let last_updates: HashMap<&str, &str> = previous
            .iter()
            .map(|lu| (lu.code.as_str(), lu.last_update.as_str()))
            .collect();

        let mut res = Classification {
            active: Vec::with_capacity(quotes.len()),
            new: Vec::new(),
            stale: Vec::new(),
        };

        for quote in quotes {
            match last_updates.get(quote.code.as_str()) {
                Some(last_update) => {
                    let is_newer = self
                        .formats
                        .parse_previous(&quote.code, last_update)
                        .and_then(|last| {
                            self.formats
                                .parse_quote(&quote.code, &quote.last_update)
                                .map(|updated_at| updated_at > last)
                        });

                    match is_newer {
                        Ok(true) => {}
                        Ok(false) => {
                            debug!(
                                "Stale {}: {} is not after {}",
                                quote.code, quote.last_update, last_update
                            );
                            res.stale.push(quote.clone());
                            continue;
                        }
                        Err(source) => {
                            return Err(ClassifyError {
                                partial: res,
                                source,
                            });
                        }
                    }
                }
                None => res.new.push(quote.clone()),
            }

            res.active.push(quote.clone());
        }

        debug!(
            "Classified {} quotes: active={}, new={}, stale={}",
            quotes.len(),
            res.active.len(),
            res.new.len(),
            res.stale.len()
        );
        Ok(res)
    }
}

/// Classify with the default timestamp formats.
pub fn filter(quotes: &[Quote], previous: &[LastUpdate]) -> Result<Classification, ClassifyError> {
    Classifier::default().classify(quotes, previous)
}
