//! Plain-text session log: start marker, one line per key, end marker, summary

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::typed::TypedText;
use crate::common::constants::terminal::MAX_SESSION_FILES_PER_SECOND;
use crate::common::time::{clock_time, display_timestamp, session_file_name};

pub struct SessionLog<W: Write> {
    out: W,
    lines: u64,
}

impl SessionLog<File> {
    /// Create `<dir>/session_<YYYYMMDD>_<HHMMSS>.txt` and write the start marker.
    ///
    /// Never reuses an existing file: a session started in the same second as
    /// an earlier one gets a `_2`, `_3`, ... suffix.
    pub fn create(dir: &Path, started: &DateTime<Local>) -> Result<(Self, PathBuf)> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory '{}'", dir.display()))?;

        for attempt in 1..=MAX_SESSION_FILES_PER_SECOND {
            let path = dir.join(session_file_name(started, attempt));
            let file = match File::options().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Session log name taken");
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create session log '{}'", path.display())
                    });
                }
            };

            debug!(path = %path.display(), "Opened session log");
            let log = Self::start(file, started)
                .with_context(|| format!("Failed to write session log '{}'", path.display()))?;
            return Ok((log, path));
        }

        bail!(
            "Too many sessions started at {} in '{}'",
            display_timestamp(started),
            dir.display()
        )
    }
}

impl<W: Write> SessionLog<W> {
    /// Wrap a writer and emit the start marker
    pub fn start(out: W, started: &DateTime<Local>) -> Result<Self> {
        let mut log = Self { out, lines: 0 };
        log.write_line(&format!(
            "--- Session started {} ---",
            display_timestamp(started)
        ))?;
        Ok(log)
    }

    pub fn record(&mut self, at: &DateTime<Local>, label: &str) -> Result<()> {
        self.write_line(&format!("{} - {}", clock_time(at), label))?;
        self.lines += 1;
        Ok(())
    }

    /// Write the end marker and the reconstructed input, then hand back the writer
    pub fn finish(mut self, ended: &DateTime<Local>, typed: &TypedText) -> Result<W> {
        self.write_line(&format!("--- Session ended {} ---", display_timestamp(ended)))?;
        self.write_line(&format!("user input: {}", typed.escaped()))?;
        debug!(keys = self.lines, "Closed session log");
        Ok(self.out)
    }

    /// Number of per-key lines written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}").context("Failed to append to session log")?;
        self.out.flush().context("Failed to flush session log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_session_layout() {
        let mut log = SessionLog::start(Vec::new(), &at(9, 0, 0)).unwrap();
        let mut typed = TypedText::new();
        for label in ["h", "ENTER", "ESC"] {
            log.record(&at(9, 0, 1), label).unwrap();
            typed.apply(label);
        }
        assert_eq!(log.lines(), 3);

        let out = String::from_utf8(log.finish(&at(9, 0, 2), &typed).unwrap()).unwrap();
        assert_eq!(
            out,
            "--- Session started 2024-05-01 09:00:00 ---\n\
             09:00:01 - h\n\
             09:00:01 - ENTER\n\
             09:00:01 - ESC\n\
             --- Session ended 2024-05-01 09:00:02 ---\n\
             user input: h\\n\n"
        );
    }

    #[test]
    fn test_empty_session_has_all_markers() {
        let log = SessionLog::start(Vec::new(), &at(9, 0, 0)).unwrap();
        let out = String::from_utf8(log.finish(&at(9, 0, 0), &TypedText::new()).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("--- Session started"));
        assert!(lines[1].starts_with("--- Session ended"));
        assert_eq!(lines[2], "user input: ");
    }

    #[test]
    fn test_create_names_file_after_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let (log, path) = SessionLog::create(&logs, &at(13, 45, 9)).unwrap();

        assert_eq!(path, logs.join("session_20240501_134509.txt"));
        drop(log);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "--- Session started 2024-05-01 13:45:09 ---\n");
    }

    #[test]
    fn test_same_second_sessions_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let started = at(13, 45, 9);

        let (first, first_path) = SessionLog::create(dir.path(), &started).unwrap();
        let (second, second_path) = SessionLog::create(dir.path(), &started).unwrap();
        drop((first, second));

        assert_ne!(first_path, second_path);
        assert_eq!(second_path, dir.path().join("session_20240501_134509_2.txt"));
        for path in [&first_path, &second_path] {
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content.matches("--- Session started").count(), 1);
        }
    }
}
