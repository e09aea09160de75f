//! Focus-scoped key event loggers.
//!
//! Two independent capture components share only ambient plumbing:
//! - [`window`]: a desktop window that records keys while it holds focus
//! - [`terminal`]: a full-screen terminal session that records keys after consent

#![deny(unsafe_code)]

pub mod common;
pub mod terminal;
pub mod window;
