//! Configuration system error types.
//!
//! Domain-specific errors for policy configuration loading, parsing,
//! and validation operations.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// These errors occur when loading, parsing, or validating the policy
/// configuration, before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Project-selection guard violations.
///
/// Both guards run before any network access; a selection that trips one
/// stops the run during configuration validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Explicit project ids and namespace paths cannot be combined.
    #[error("Arguments `namespace_paths`, `project_ids` and `project_slugs` are mutually exclusive")]
    MutuallyExclusiveSelectors,

    /// Project slugs are resolved against the first namespace path, so they
    /// cannot appear without one.
    #[error("Argument `project_slugs` should be specified with `namespace_paths` argument")]
    SlugsWithoutNamespaces,
}
