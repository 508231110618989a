//! Error types for GitLab client operations.
//!
//! This module defines the error types that can occur when talking to the
//! GitLab API through the gitlab_client crate. It provides enough context
//! (path, status code, response body) for callers to report failures without
//! re-fetching anything.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitLab client operations.
///
/// This enum represents all possible error conditions when working with the
/// GitLab API: client construction problems, transport failures, rejected
/// requests, and data processing issues.
///
/// ## Examples
///
/// ```rust,ignore
/// use gitlab_client::Error;
///
/// match client.list_projects().await {
///     Ok(projects) => println!("Found {} projects", projects.len()),
///     Err(Error::RemoteCallFailed { path, status, .. }) => {
///         eprintln!("GET {} answered {}", path, status)
///     }
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The access token could not be installed as a request header.
    ///
    /// This error occurs when the supplied token contains bytes that are not
    /// valid in an HTTP header value. The token itself is never included in
    /// the message.
    #[error("Failed to authenticate or initialize GitLab client: {0}")]
    AuthError(String),

    /// Error deserializing a response from GitLab.
    ///
    /// This error occurs when the GitLab API returns a 2xx response whose
    /// body cannot be parsed into the expected data structure. This may
    /// indicate:
    /// - API version changes
    /// - Unexpected response format
    /// - Corrupted response data
    #[error("Failed to deserialize GitLab response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The configured instance URL could not be parsed.
    ///
    /// The client derives its API root from the instance URL at construction
    /// time; a URL that does not parse is rejected before any request is
    /// made.
    #[error("Invalid GitLab base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The URL as supplied by the caller.
        url: String,
        /// Why it did not parse.
        reason: String,
    },

    /// A read call was answered with a status outside the 2xx range.
    ///
    /// Carries the request path, the status code and the response body so
    /// the operator can see exactly what the platform objected to. Read
    /// failures are not retried; they abort the run.
    #[error("Undesired ({status}) response from `{path}`")]
    RemoteCallFailed {
        /// API path of the failing request.
        path: String,
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The underlying HTTP transport failed before a response was produced.
    ///
    /// Connection refusals, DNS failures and protocol errors end up here.
    #[error("GitLab request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
