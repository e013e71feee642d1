//! File-backed store for accepted quotes and the last-update view.
//!
//! `JsonStore` keeps two files in one directory:
//! - `stocks.jsonl` — every inserted quote, one JSON object per line, append-only;
//! - `last_updates.json` — latest `LastUpdate` per code, rebuilt by `refresh`.
//!
//! A missing view reads as an empty history, which makes the first run classify
//! every quote as new.
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::debug;
use stock_common::{IngestError, LastUpdate, Quote, Result, TimestampFormats};
use tempfile::NamedTempFile;

const STOCKS_FILE: &str = "stocks.jsonl";
const LAST_UPDATES_FILE: &str = "last_updates.json";

/// Sink for accepted quotes.
pub trait QuoteRepository {
    /// Store `quotes`, returning how many were written.
    fn insert(&mut self, quotes: &[Quote]) -> Result<usize>;
}

/// Source of previous-update records.
pub trait LastUpdateRepository {
    /// Latest recorded update per code.
    fn get(&self) -> Result<Vec<LastUpdate>>;
    /// Rebuild the records from everything stored so far.
    fn refresh(&mut self) -> Result<()>;
}

/// Directory-backed JSON store.
pub struct JsonStore {
    dir: PathBuf,
    formats: TimestampFormats,
}

impl JsonStore {
    /// Open (creating if needed) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>, formats: TimestampFormats) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, formats })
    }

    /// Directory the store lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stocks_path(&self) -> PathBuf {
        self.dir.join(STOCKS_FILE)
    }

    fn last_updates_path(&self) -> PathBuf {
        self.dir.join(LAST_UPDATES_FILE)
    }

    /// Every quote inserted so far, in insertion order.
    pub fn stocks(&self) -> Result<Vec<Quote>> {
        let path = self.stocks_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut quotes = Vec::new();
        for line in BufReader::new(File::open(path)?).lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }
            quotes.push(serde_json::from_str(trimmed_line)?);
        }
        Ok(quotes)
    }
}

impl QuoteRepository for JsonStore {
    fn insert(&mut self, quotes: &[Quote]) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.stocks_path())?;
        let mut writer = BufWriter::new(file);

        let mut inserted = 0;
        for quote in quotes {
            serde_json::to_writer(&mut writer, quote)?;
            writer.write_all(b"\n")?;
            inserted += 1;
        }
        writer.flush()?;

        debug!("Inserted {} quotes into {}", inserted, self.dir.display());
        Ok(inserted)
    }
}

impl LastUpdateRepository for JsonStore {
    fn get(&self) -> Result<Vec<LastUpdate>> {
        let path = self.last_updates_path();
        if !path.exists() {
            debug!("No last-update view at {}", path.display());
            return Ok(Vec::new());
        }
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    fn refresh(&mut self) -> Result<()> {
        let mut latest: BTreeMap<String, NaiveDateTime> = BTreeMap::new();
        for quote in self.stocks()? {
            let updated_at = self.formats.parse_quote(&quote.code, &quote.last_update)?;
            latest
                .entry(quote.code)
                .and_modify(|at| *at = (*at).max(updated_at))
                .or_insert(updated_at);
        }

        let view: Vec<LastUpdate> = latest
            .iter()
            .map(|(code, at)| LastUpdate::new(code, &self.formats.format_previous(at)))
            .collect();

        // write aside, then swap in
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &view)?;
        tmp.flush()?;
        tmp.persist(self.last_updates_path()).map_err(|e| IngestError::Io(e.error))?;

        debug!("Refreshed last-update view with {} codes", view.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("store"), TimestampFormats::default()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_has_no_history() {
        let (_dir, store) = store();
        assert!(store.get().unwrap().is_empty());
        assert!(store.stocks().unwrap().is_empty());
    }

    #[test]
    fn test_insert_appends_across_calls() {
        let (_dir, mut store) = store();
        let a = Quote::new("A", "2020-02-03T00:00:00", 1.0);
        let b = Quote::new("B", "2020-02-03T00:00:00", -1.0);

        assert_eq!(store.insert(&[a.clone()]).unwrap(), 1);
        assert_eq!(store.insert(&[b.clone()]).unwrap(), 1);

        assert_eq!(store.stocks().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_refresh_keeps_latest_update_per_code() {
        let (_dir, mut store) = store();
        store
            .insert(&[
                Quote::new("B", "2020-02-03T10:00:00", 0.0),
                Quote::new("A", "2020-02-04T00:00:00", 0.0),
                Quote::new("A", "2020-02-02T00:00:00", 0.0),
            ])
            .unwrap();

        store.refresh().unwrap();

        assert_eq!(
            store.get().unwrap(),
            vec![
                LastUpdate::new("A", "2020-02-04 00:00:00"),
                LastUpdate::new("B", "2020-02-03 10:00:00"),
            ]
        );
    }

    #[test]
    fn test_refresh_replaces_view_without_leftovers() {
        let (_dir, mut store) = store();
        store.insert(&[Quote::new("A", "2020-02-02T00:00:00", 0.0)]).unwrap();
        store.refresh().unwrap();
        store.insert(&[Quote::new("A", "2020-02-05T00:00:00", 0.0)]).unwrap();

        store.refresh().unwrap();

        assert_eq!(
            store.get().unwrap(),
            vec![LastUpdate::new("A", "2020-02-05 00:00:00")]
        );
        let mut names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec![LAST_UPDATES_FILE, STOCKS_FILE]);
    }

    #[test]
    fn test_refresh_fails_on_bad_stored_timestamp() {
        let (_dir, mut store) = store();
        store.insert(&[Quote::new("A", "soon", 0.0)]).unwrap();

        let err = store.refresh().unwrap_err();

        assert!(matches!(err, IngestError::Timestamp(_)));
    }
}
