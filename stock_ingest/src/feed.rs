//! Quote feed loading.
//!
//! The feed is a JSON array of stock snapshots, read from a file or from stdin
//! when the path is `-`.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use log::debug;
use stock_common::{IngestError, Quote, Result};

/// Path value that selects stdin.
pub const STDIN: &str = "-";

/// Read and decode the quote batch named by `source`.
pub fn load_quotes(source: &str) -> Result<Vec<Quote>> {
    let source = source.trim();
    if source == STDIN {
        debug!("Reading quotes from stdin");
        return read_quotes(io::stdin().lock());
    }

    let path = normalize_path(source);
    if !is_file_exist(&path) {
        return Err(IngestError::Format(format!(
            "Feed file not found: {}",
            path.display()
        )));
    }
    debug!("Reading quotes from {}", path.display());
    read_quotes(BufReader::new(File::open(path)?))
}

/// Decode a JSON array of quotes from `reader`.
pub fn read_quotes<R: Read>(reader: R) -> Result<Vec<Quote>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
