//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, EnvCommand, ShowCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered configuration.
#[derive(Debug, Parser)]
#[command(name = "stratum")]
#[command(version, about = "Load layered configuration with imports and parameters", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding per-environment configuration files
    #[arg(long, value_name = "PATH", global = true, env = "STRATUM_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a configuration resource and print the merged result
    Show(ShowCommand),

    /// Load the configuration for an environment
    Env(EnvCommand),

    /// Validate a configuration resource
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
