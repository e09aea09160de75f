//! Per-window capture state: transcript plus log sink

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;

use super::csv_log::CsvKeyLog;
use super::label::KeyStroke;
use crate::common::constants::window::TRANSCRIPT_HEADER;
use crate::common::time::display_timestamp;

/// State handed to the key handler on every frame
#[derive(Debug)]
pub struct WindowCapture {
    transcript: String,
    log: CsvKeyLog,
    recorded: u64,
}

impl WindowCapture {
    pub fn new(log: CsvKeyLog) -> Self {
        Self {
            transcript: TRANSCRIPT_HEADER.to_string(),
            log,
            recorded: 0,
        }
    }

    /// Show the stroke in the transcript, then append it to the CSV log
    pub fn record(
        &mut self,
        stroke: &KeyStroke,
        local: &DateTime<Local>,
        utc: &DateTime<Utc>,
    ) -> Result<()> {
        let label = stroke.label();
        self.transcript
            .push_str(&format!("{}  {}\n", display_timestamp(local), label));
        self.log.append(utc, &label)?;
        self.recorded += 1;
        Ok(())
    }

    /// Erase the on-screen transcript; the log file is untouched
    pub fn clear_view(&mut self) {
        self.transcript = TRANSCRIPT_HEADER.to_string();
    }

    pub fn log_location(&self) -> PathBuf {
        self.log.absolute_path()
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of strokes recorded since start, including cleared ones
    pub fn recorded(&self) -> u64 {
        self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, WindowCapture) {
        let dir = tempfile::tempdir().unwrap();
        let capture = WindowCapture::new(CsvKeyLog::new(dir.path().join("keys.csv")));
        (dir, capture)
    }

    fn times() -> (DateTime<Local>, DateTime<Utc>) {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        (utc.with_timezone(&Local), utc)
    }

    #[test]
    fn test_record_updates_transcript_and_log() {
        let (dir, mut capture) = fixture();
        let (local, utc) = times();

        capture.record(&KeyStroke::printable('h'), &local, &utc).unwrap();
        capture.record(&KeyStroke::named("Return"), &local, &utc).unwrap();

        let expected_prefix = display_timestamp(&local);
        assert!(capture.transcript().starts_with(TRANSCRIPT_HEADER));
        assert!(capture.transcript().ends_with(&format!(
            "{expected_prefix}  h\n{expected_prefix}  [Return]\n"
        )));

        let csv = fs::read_to_string(dir.path().join("keys.csv")).unwrap();
        assert!(csv.ends_with(",h\r\n2024-05-01T12:00:00.000000Z,[Return]\r\n"));
        assert_eq!(capture.recorded(), 2);
    }

    #[test]
    fn test_clear_view_keeps_log() {
        let (dir, mut capture) = fixture();
        let (local, utc) = times();

        capture.record(&KeyStroke::printable('x'), &local, &utc).unwrap();
        capture.clear_view();

        assert_eq!(capture.transcript(), TRANSCRIPT_HEADER);
        let csv = fs::read_to_string(dir.path().join("keys.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_log_location_is_absolute() {
        let (_dir, capture) = fixture();
        assert!(capture.log_location().is_absolute());
    }

    #[test]
    fn test_record_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut capture =
            WindowCapture::new(CsvKeyLog::new(dir.path().join("nope").join("keys.csv")));
        let (local, utc) = times();
        assert!(capture.record(&KeyStroke::printable('a'), &local, &utc).is_err());
    }
}
