//! CLI command implementations.
//!
//! - `show`: Load a resource and print the merged result
//! - `env`: Load the configuration for an environment name
//! - `validate`: Check that a resource loads and substitutes cleanly
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod env;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use env::EnvCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
