//! Library half of the `nova-highlight` binary.
//!
//! Exposed so the configuration and report logic can be unit tested without
//! spawning the CLI.

pub mod config;
pub mod report;
