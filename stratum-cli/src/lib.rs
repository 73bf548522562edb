//! Library exports for stratum-cli.
//!
//! This module exports the CLI structure so it can be inspected outside the
//! binary, for example to generate documentation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

// Re-export CLI for documentation tooling
pub use cli::Cli;
