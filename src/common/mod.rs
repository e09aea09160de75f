//! Shared plumbing used by both capture components
//!
//! Constants, timestamp formatting, and diagnostics setup. No capture logic lives here.

pub mod constants;
pub mod logging;
pub mod time;
