//! Env command implementation.
//!
//! Resolves an environment name to a file in the configuration directory,
//! then loads and prints it like `show`.

use crate::error::CliError;
use crate::utils::{GlobalOptions, LoadArgs};
use clap::Args;
use stratum::LoadOptions;

/// Load the configuration for an environment.
#[derive(Debug, Args)]
pub struct EnvCommand {
    /// Environment name (defaults to $STRATUM_ENV)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub load: LoadArgs,
}

impl EnvCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let locator = global.locator();
        log::info!(
            "resolving environment {} in {}",
            self.name.as_deref().unwrap_or("$STRATUM_ENV"),
            locator.directory.display()
        );

        let options = self
            .load
            .apply(LoadOptions::environment(self.name.clone()).locator(locator));
        let document = options.load()?;

        self.load.print(&document)
    }
}
