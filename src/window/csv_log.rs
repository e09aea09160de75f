//! Append-only CSV log of window key events

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::debug;

use crate::common::constants::window::CSV_HEADER;
use crate::common::time::iso_utc_timestamp;

/// CSV file with a `timestamp,key` header, reopened for every append
#[derive(Debug, Clone)]
pub struct CsvKeyLog {
    path: PathBuf,
}

impl CsvKeyLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Absolute location of the log file, as shown to the operator
    pub fn absolute_path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// Append one row, writing the header first if the file is new
    pub fn append(&self, at: &DateTime<Utc>, label: &str) -> Result<()> {
        let header_needed = !self.path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open key log '{}'", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        if header_needed {
            debug!(path = %self.path.display(), "Creating key log with header");
            wtr.write_record(CSV_HEADER)
                .with_context(|| format!("Failed to write header to '{}'", self.path.display()))?;
        }
        wtr.write_record([iso_utc_timestamp(at).as_str(), label])
            .with_context(|| format!("Failed to append to key log '{}'", self.path.display()))?;
        wtr.flush()
            .with_context(|| format!("Failed to flush key log '{}'", self.path.display()))
    }
}
