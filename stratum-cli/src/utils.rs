//! Utility functions for CLI operations.
//!
//! This module provides the options shared by the loading commands,
//! parameter parsing and output formatting.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use stratum::{Document, EnvironmentLocator, LoadOptions, ParameterMode};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // Verbosity is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the environment configuration directory.
    pub config_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// The environment locator, with `--config-dir` applied.
    pub fn locator(&self) -> EnvironmentLocator {
        let locator = EnvironmentLocator::from_env();
        match &self.config_dir {
            Some(dir) => locator.with_directory(dir),
            None => locator,
        }
    }
}

/// Output format for loaded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML document.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Options shared by the commands that load and print a document.
#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Set an external parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Take external parameters from the process environment
    #[arg(long)]
    pub from_env: bool,

    /// Only let external parameters override names the document declares
    #[arg(long)]
    pub safe: bool,

    /// Substitute parameters even when no external ones are given
    #[arg(long)]
    pub substitute: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "yaml", ignore_case = true)]
    pub format: OutputFormat,

    /// Print only the value at a dotted path (e.g. database.host)
    #[arg(long, value_name = "PATH")]
    pub get: Option<String>,
}

impl LoadArgs {
    /// The substitution mode these flags select.
    pub fn mode(&self) -> ParameterMode {
        if self.safe {
            ParameterMode::Safe
        } else if self.substitute || self.from_env || !self.params.is_empty() {
            ParameterMode::Merge
        } else {
            ParameterMode::None
        }
    }

    /// Apply these flags to a load.
    pub fn apply(&self, options: LoadOptions) -> LoadOptions {
        options
            .mode(self.mode())
            .from_env(self.from_env)
            .parameters(self.params.iter().cloned())
    }

    /// Print `document`, or the value selected by `--get`.
    pub fn print(&self, document: &Document) -> Result<(), CliError> {
        let selected = match &self.get {
            Some(path) => select(document, path)?,
            None => document,
        };
        let rendered = render(selected, self.format)?;

        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{rendered}")?;
        if !rendered.ends_with('\n') {
            writeln!(stdout)?;
        }
        Ok(())
    }
}

/// Parse a `KEY=VALUE` pair.
///
/// The value may itself contain `=`; the key may not be empty.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{s}': expected KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("invalid parameter '{s}': empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Look up a dotted path, failing if nothing is there.
pub fn select<'a>(document: &'a Document, path: &str) -> Result<&'a Document, CliError> {
    document
        .pointer(path)
        .ok_or_else(|| CliError::SemanticFailure(format!("No value at '{path}'")))
}

/// Render a document in the requested format.
///
/// Scalar strings are printed bare so `--get` output can be used in scripts.
pub fn render(document: &Document, format: OutputFormat) -> Result<String, CliError> {
    if let Some(s) = document.as_str() {
        return Ok(s.to_string());
    }
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).map_err(|e| CliError::Output(e.to_string()))
        }
    }
}
