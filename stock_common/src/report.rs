//! Human-readable summary of an ingestion run.
use std::fmt;

use clap::ValueEnum;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::aggregate::AggregateResult;
use crate::error::IngestError;

/// Counts and code lists of one aggregation, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Quotes received from the feed.
    pub received: usize,
    /// Quotes accepted as Active.
    pub active: usize,
    /// Quotes rejected as Stale.
    pub stale: usize,
    /// Codes seen for the first time.
    pub new: Vec<String>,
    /// Top gainer codes, best first.
    pub gainers: Vec<String>,
    /// Top loser codes, worst first.
    pub losers: Vec<String>,
}

impl Report {
    /// Summarize `res` for a batch of `received` quotes.
    pub fn new(received: usize, res: &AggregateResult) -> Self {
        Report {
            received,
            active: res.active.len(),
            stale: res.stale.len(),
            new: res.new_codes(),
            gainers: res.top_gainers.clone(),
            losers: res.top_losers.clone(),
        }
    }

    /// Text lines, skipping the empty sections.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Received: {}, Active: {}, Stale: {}, New: {}",
            self.received,
            self.active,
            self.stale,
            self.new.len()
        )];
        if !self.new.is_empty() {
            lines.push(self.new.join(" "));
        }
        if !self.gainers.is_empty() {
            lines.push(format!("Gainers: {}", self.gainers.join(" ")));
        }
        if !self.losers.is_empty() {
            lines.push(format!("Losers: {}", self.losers.join(" ")));
        }
        lines
    }

    /// Render in `format`.
    pub fn render(&self, format: ReportFormat) -> Result<String, IngestError> {
        match format {
            ReportFormat::Text => Ok(self.to_string()),
            ReportFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Output format of the run report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ReportFormat {
    /// One summary line per section.
    #[default]
    Text,
    /// Single-line JSON object.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::Quote;

    fn report() -> Report {
        Report {
            received: 4,
            active: 3,
            stale: 1,
            new: vec!["C".into(), "F".into()],
            gainers: vec!["A".into()],
            losers: vec!["E".into(), "G".into()],
        }
    }

    #[test]
    fn test_text_report_has_all_sections() {
        assert_eq!(
            report().to_string(),
            "Received: 4, Active: 3, Stale: 1, New: 2\nC F\nGainers: A\nLosers: E G"
        );
    }

    #[test]
    fn test_text_report_skips_empty_sections() {
        let report = Report {
            received: 2,
            stale: 2,
            ..Default::default()
        };
        assert_eq!(report.lines(), vec!["Received: 2, Active: 0, Stale: 2, New: 0"]);
    }

    #[test]
    fn test_report_from_aggregate_result() {
        let res = AggregateResult {
            active: vec![Quote::new("A", "", 1.0), Quote::new("C", "", 0.0)],
            new: vec![Quote::new("C", "", 0.0)],
            stale: vec![Quote::new("B", "", 0.5)],
            top_gainers: vec!["A".into()],
            top_losers: vec![],
        };

        let report = Report::new(3, &res);

        assert_eq!(report.active, 2);
        assert_eq!(report.stale, 1);
        assert_eq!(report.new, vec!["C"]);
        assert_eq!(report.gainers, vec!["A"]);
    }

    #[test]
    fn test_json_render() {
        let json = report().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["received"], 4);
        assert_eq!(value["losers"][1], "G");
    }

    #[test]
    fn test_report_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::Text.to_string(), "text");
    }
}
