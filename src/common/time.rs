//! Timestamp formats used in transcripts, log rows and file names
//!
//! Pure functions over `DateTime` values; callers pick the clock.

use chrono::{DateTime, Local, TimeZone, Utc};

/// `2024-05-01 13:45:09`, used for on-screen transcripts and session markers
pub fn display_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `2024-05-01T13:45:09.123456Z`, used for CSV rows
pub fn iso_utc_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// `13:45:09`, prefix of each session log line
pub fn clock_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// `session_20240501_134509.txt`, or `session_20240501_134509_<n>.txt` for
/// later sessions started within the same second
pub fn session_file_name(at: &DateTime<Local>, attempt: u32) -> String {
    let stem = at.format("session_%Y%m%d_%H%M%S");
    match attempt {
        0 | 1 => format!("{stem}.txt"),
        n => format!("{stem}_{n}.txt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_iso_utc_has_micros_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 9).unwrap();
        assert_eq!(iso_utc_timestamp(&at), "2024-05-01T13:45:09.000000Z");
    }

    #[test]
    fn test_clock_time() {
        assert_eq!(clock_time(&local_at(7, 3, 0)), "07:03:00");
    }

    #[test]
    fn test_session_file_name() {
        assert_eq!(
            session_file_name(&local_at(13, 45, 9), 1),
            "session_20240501_134509.txt"
        );
        assert_eq!(
            session_file_name(&local_at(13, 45, 9), 3),
            "session_20240501_134509_3.txt"
        );
    }

    #[test]
    fn test_display_timestamp() {
        assert_eq!(display_timestamp(&local_at(0, 0, 1)), "2024-05-01 00:00:01");
    }
}
