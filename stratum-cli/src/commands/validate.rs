//! Command to validate a configuration resource.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use stratum::{LoadOptions, ParameterMode};

/// Validate a configuration resource.
///
/// A resource is valid when it loads, every import resolves and every
/// parameter token can be substituted from the embedded parameters and the
/// process environment.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "RESOURCE")]
    pub resource: String,
}

impl ValidateCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let result = LoadOptions::resource(self.resource.as_str())
            .mode(ParameterMode::Merge)
            .from_env(true)
            .load();

        match result {
            Ok(_) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
