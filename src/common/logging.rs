//! Diagnostics setup shared by both binaries

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::common::constants::logging::{DEBUG_FILTER, DEFAULT_FILTER, QUIET_FILTER};

/// How loud diagnostics should be when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Informational messages (window component default)
    Normal,
    /// Warnings only (terminal component default)
    Quiet,
    /// Debug output for this crate
    Debug,
}

impl Verbosity {
    pub fn filter_directives(self) -> &'static str {
        match self {
            Self::Normal => DEFAULT_FILTER,
            Self::Quiet => QUIET_FILTER,
            Self::Debug => DEBUG_FILTER,
        }
    }
}

/// Install the global tracing subscriber. Output goes to stderr.
pub fn init_tracing(verbosity: Verbosity) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directives()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_filter_targets_this_crate() {
        assert!(Verbosity::Debug.filter_directives().contains("keytrace=debug"));
    }

    #[test]
    fn test_filters_parse() {
        for v in [Verbosity::Normal, Verbosity::Quiet, Verbosity::Debug] {
            assert!(EnvFilter::try_new(v.filter_directives()).is_ok());
        }
    }
}
