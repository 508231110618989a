use policy_roller_core::PolicyRollerError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the PolicyRoller CLI application.
///
/// This enum represents all possible error conditions that can arise during
/// CLI operations: building the API client, loading and validating the
/// policy configuration, and running the policy sections themselves.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to construct the GitLab API client.
    ///
    /// This error is returned when the base URL cannot be parsed or the
    /// credential header cannot be built from the provided token.
    #[error("Client error: {0}")]
    Client(gitlab_client::Error),

    /// Configuration error occurred while loading or validating the policy.
    ///
    /// This error is returned when the policy file is missing or malformed,
    /// when a section carries an unusable value, or when the project
    /// selection trips one of the pre-run guards.
    #[error("Configuration error: {0}")]
    Config(config_manager::ConfigurationError),

    /// A policy run failed midway.
    ///
    /// This error carries the first failure the run hit: a rejected update,
    /// a duplicate default rule, or a remote call that did not come back.
    /// The message is already self-contained, so it is passed through
    /// without a prefix.
    #[error("{0}")]
    Run(PolicyRollerError),

    /// Failed to serialize the default policy to TOML.
    ///
    /// This error is returned by the `defaults` subcommand when the stock
    /// policy cannot be rendered as a TOML document.
    #[error("Failed to serialize the default policy configuration.")]
    SerializeToml(toml::ser::Error),
}

impl Error {
    /// The process exit code for this error.
    ///
    /// Problems a caller can fix by correcting arguments or the policy file
    /// exit with 2, matching the argument-parser convention. Failures during
    /// the run itself exit with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::Run(
                PolicyRollerError::Configuration(_) | PolicyRollerError::Selection(_),
            ) => 2,
            _ => 1,
        }
    }
}
