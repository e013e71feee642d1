//! Run summary collection and delivery.
//!
//! `Summary` logs each line as it is written and keeps a copy, so the whole run
//! can be handed to a `Notifier` at the end, failures included.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::{error, info};
use stock_common::Result;

/// Receiver of the human-readable run summary.
pub trait Notifier {
    /// Deliver `message`.
    fn send(&self, message: &str) -> Result<()>;
}

/// Writes the summary to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &str) -> Result<()> {
        for line in message.lines() {
            info!("notify: {}", line);
        }
        Ok(())
    }
}

/// Appends the summary to an outbox file, blank-line separated.
pub struct FileNotifier {
    path: PathBuf,
}

impl FileNotifier {
    /// Notifier appending to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Notifier for FileNotifier {
    fn send(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}\n", message.trim_end())?;
        Ok(())
    }
}

/// Lines logged during a run.
#[derive(Debug, Default)]
pub struct Summary {
    lines: Vec<String>,
}

impl Summary {
    /// Log `line` at info level and keep it.
    pub fn info(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{}", line);
        self.lines.push(line);
    }

    /// Log `line` at error level and keep it.
    pub fn error(&mut self, line: impl Into<String>) {
        let line = line.into();
        error!("{}", line);
        self.lines.push(line);
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hand the summary to `notifier`. Empty summaries are not sent and a failed
    /// delivery is only logged.
    pub fn send(&self, notifier: &dyn Notifier) {
        if self.is_empty() {
            return;
        }
        info!("Sending run summary...");
        match notifier.send(&self.to_string()) {
            Ok(()) => info!("Done"),
            Err(e) => error!("Failed to send run summary: {}", e),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
