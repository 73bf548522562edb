//! Show command implementation.
//!
//! Loads a resource, expands its imports, optionally substitutes
//! parameters and prints the result.

use crate::error::CliError;
use crate::utils::{GlobalOptions, LoadArgs};
use clap::Args;
use stratum::LoadOptions;

/// Load a configuration resource and print the merged result.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Configuration file to load (.yaml, .yml or .json)
    #[arg(value_name = "RESOURCE")]
    pub resource: String,

    #[command(flatten)]
    pub load: LoadArgs,
}

impl ShowCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        if self.resource.is_empty() {
            return Err(CliError::InvalidArguments(
                "resource must not be empty".to_string(),
            ));
        }

        log::info!("loading {}", self.resource);
        let options = self.load.apply(LoadOptions::resource(self.resource.as_str()));
        let document = options.load()?;

        self.load.print(&document)
    }
}
