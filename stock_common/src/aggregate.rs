//! Classification plus top gainers / losers ranking.
//!
//! Runs the `Classifier`, then feeds every Active quote's one-day gain into two
//! `TopList`s: one ordered by descending gain, one by ascending gain. Flat
//! quotes (gain exactly `0.0`) and NaN gains are ranked in neither.
use log::debug;
use serde::Serialize;

use crate::error::ClassifyError;
use crate::filter::{Classification, Classifier};
use crate::quote::{LastUpdate, Quote};
use crate::toplist::TopList;

/// Code and gain of a ranked quote.
#[derive(Debug, Clone, PartialEq)]
pub struct StockGain {
    /// Stock code.
    pub code: String,
    /// One-day gain.
    pub gain: f64,
}

fn more_gain(a: &StockGain, b: &StockGain) -> bool {
    a.gain > b.gain
}

fn more_loss(a: &StockGain, b: &StockGain) -> bool {
    a.gain < b.gain
}

/// Final outcome of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Quotes accepted as newer than their record, in input order.
    pub active: Vec<Quote>,
    /// Quotes without any record, in input order.
    pub new: Vec<Quote>,
    /// Quotes not newer than their record, in input order.
    pub stale: Vec<Quote>,
    /// Codes of the biggest gainers, best first.
    pub top_gainers: Vec<String>,
    /// Codes of the biggest losers, worst first.
    pub top_losers: Vec<String>,
}

impl AggregateResult {
    /// Codes of the New quotes, in input order.
    pub fn new_codes(&self) -> Vec<String> {
        extract_codes(&self.new)
    }
}

/// Classifier and ranking depth bundled for repeated runs.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    classifier: Classifier,
    num_of_top_rank: usize,
}

impl Aggregator {
    /// Aggregate with `classifier`, keeping `num_of_top_rank` gainers and losers.
    pub fn new(classifier: Classifier, num_of_top_rank: usize) -> Self {
        Self {
            classifier,
            num_of_top_rank,
        }
    }

    /// Classify `quotes` against `previous` and rank the Active ones.
    ///
    /// A classification failure is returned unchanged, partial result included.
    pub fn aggregate(
        &self,
        quotes: &[Quote],
        previous: &[LastUpdate],
    ) -> Result<AggregateResult, ClassifyError> {
        let Classification { active, new, stale } = self.classifier.classify(quotes, previous)?;
        let (top_gainers, top_losers) = top_ranks(&active, self.num_of_top_rank);

        debug!(
            "Ranked {} active quotes: {} gainers, {} losers",
            active.len(),
            top_gainers.len(),
            top_losers.len()
        );

        Ok(AggregateResult {
            active,
            new,
            stale,
            top_gainers,
            top_losers,
        })
    }
}

/// Aggregate with the default timestamp formats.
pub fn aggregate(
    quotes: &[Quote],
    previous: &[LastUpdate],
    num_of_top_rank: usize,
) -> Result<AggregateResult, ClassifyError> {
    Aggregator::new(Classifier::default(), num_of_top_rank).aggregate(quotes, previous)
}

/// Rank `quotes` into the codes of the top `n` gainers and top `n` losers.
///
/// Ties keep the order of `quotes`.
pub fn top_ranks(quotes: &[Quote], n: usize) -> (Vec<String>, Vec<String>) {
    let mut gainers: TopList<StockGain> = TopList::new(n, more_gain);
    let mut losers: TopList<StockGain> = TopList::new(n, more_loss);

    for quote in quotes {
        let gain = quote.gain;
        let list = if gain > 0.0 {
            &mut gainers
        } else if gain < 0.0 {
            &mut losers
        } else {
            // flat, or NaN
            continue;
        };
        list.add(StockGain {
            code: quote.code.clone(),
            gain,
        });
    }

    (
        extract_top_rank_codes(gainers.elements()),
        extract_top_rank_codes(losers.elements()),
    )
}

fn extract_top_rank_codes(ranked: &[StockGain]) -> Vec<String> {
    ranked.iter().map(|sg| sg.code.clone()).collect()
}

/// Codes of `quotes`, in order.
pub fn extract_codes(quotes: &[Quote]) -> Vec<String> {
    quotes.iter().map(|q| q.code.clone()).collect()
}
