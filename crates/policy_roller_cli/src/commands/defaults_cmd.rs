//! Prints the default policy configuration.
//!
//! The rendered document is a complete, valid policy file carrying the
//! documented platform defaults for every section. Redirecting it to a
//! file gives a starting point for a customized policy.

use config_manager::PolicyConfig;
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "defaults_cmd_tests.rs"]
mod tests;

/// Renders the default policy as a TOML document.
pub fn render_defaults() -> Result<String, Error> {
    toml::to_string_pretty(&PolicyConfig::default()).map_err(Error::SerializeToml)
}

/// Execute the defaults command
#[instrument]
pub fn execute() -> Result<(), Error> {
    print!("{}", render_defaults()?);
    Ok(())
}
