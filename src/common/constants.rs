//! Defaults and fixed strings for both capture components

/// Windowed component defaults
pub mod window {
    /// CSV log path, relative to the working directory
    pub const LOG_FILE: &str = "keys_log.csv";
    pub const CSV_HEADER: [&str; 2] = ["timestamp", "key"];

    pub const TITLE: &str = "Foreground Key Logger";
    pub const WIDTH: f32 = 700.0;
    pub const HEIGHT: f32 = 450.0;

    pub const FOCUS_NOTICE: &str = "This app captures keys ONLY while it is focused.\n\
                                    Press keys here while this window has focus.";
    pub const TRANSCRIPT_HEADER: &str = "Timestamp                Key\n\
                                         ------------------------------\n";
    pub const CLOSE_HINT: &str = "Close window to stop logging.";
    pub const QUIT_PROMPT: &str = "Stop logging and close the app?";
}

/// Terminal component defaults
pub mod terminal {
    /// Directory that receives one file per session
    pub const LOG_DIR: &str = "logs";

    /// Same-second session files tried before giving up
    pub const MAX_SESSION_FILES_PER_SECOND: u32 = 100;

    /// Exact text the operator must type before the terminal is taken over
    pub const CONSENT_PHRASE: &str = "I CONSENT";

    pub const HEADER_LINES: [&str; 3] = [
        "Terminal Key Logger - recording keys typed into this terminal",
        "Press ESC to stop (Ctrl+C also ends the session)",
        "--------------------------------------------------------------",
    ];

    /// Interval at which the read loop checks for a termination signal
    pub const POLL_INTERVAL_MS: u64 = 250;
}

/// Diagnostics filter defaults
pub mod logging {
    pub const DEFAULT_FILTER: &str = "info";
    pub const DEBUG_FILTER: &str = "info,keytrace=debug";
    /// The terminal component owns the screen, so it stays quiet unless asked
    pub const QUIET_FILTER: &str = "warn";
}
