//! Build script for stratum-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Options shared by `show` and `env`.
fn load_args() -> Vec<Arg> {
    vec![
        Arg::new("param")
            .long("param")
            .help("Set an external parameter (repeatable)")
            .value_name("KEY=VALUE")
            .action(clap::ArgAction::Append),
        Arg::new("from-env")
            .long("from-env")
            .help("Take external parameters from the process environment")
            .action(clap::ArgAction::SetTrue),
        Arg::new("safe")
            .long("safe")
            .help("Only let external parameters override names the document declares")
            .action(clap::ArgAction::SetTrue),
        Arg::new("substitute")
            .long("substitute")
            .help("Substitute parameters even when no external ones are given")
            .action(clap::ArgAction::SetTrue),
        Arg::new("format")
            .long("format")
            .help("Output format")
            .value_parser(["yaml", "json"])
            .default_value("yaml"),
        Arg::new("get")
            .long("get")
            .help("Print only the value at a dotted path (e.g. database.host)")
            .value_name("PATH"),
    ]
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("stratum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load layered configuration with imports and parameters")
        .long_about(
            "Command-line tool for loading configuration files that import other files \
             and substitute %NAME% parameters",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding per-environment configuration files")
                .value_name("PATH")
                .global(true)
                .env("STRATUM_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Load a configuration resource and print the merged result")
                .arg(Arg::new("resource").value_name("RESOURCE").required(true))
                .args(load_args()),
            Command::new("env")
                .about("Load the configuration for an environment")
                .long_about(
                    "Resolve NAME (or $STRATUM_ENV) to <config-dir>/NAME.{yaml,yml,json} and load it",
                )
                .arg(Arg::new("name").value_name("NAME"))
                .args(load_args()),
            Command::new("validate")
                .about("Validate a configuration resource")
                .long_about(
                    "Check that a resource loads, its imports resolve and every parameter substitutes",
                )
                .arg(Arg::new("resource").value_name("RESOURCE").required(true)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("stratum.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
