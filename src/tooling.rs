//! Tooling & Integration Layer
//!
//! CLI entry points for running the synchronization check and regenerating
//! manifests outside the test harness.

pub mod cli;

pub use cli::{execute, Cli, Commands};
