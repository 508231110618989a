//! Error types for policy reconciliation.
//!
//! This module defines the reconciliation-specific failures plus the
//! umbrella error a policy run surfaces. Every error is terminal for the
//! run: there is no retry, no backoff, and no per-project continuation.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while reconciling policy sections against projects.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A write was answered with a status outside the accepted set for its
    /// section.
    ///
    /// Carries the project, the section being applied, and the raw response
    /// so the operator sees exactly what the platform objected to.
    #[error("Project {project_id} failed to update. Reason: \n{status} - {body}")]
    UpdateRejected {
        /// Identifier of the project whose update was rejected.
        project_id: u64,
        /// Section label under which the write would have been recorded.
        section: String,
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A project holds more than one default (any-approver) approval rule.
    ///
    /// This is a data-integrity condition on the remote side, not a
    /// transient failure: the platform invariant is one default rule per
    /// project, and this tool refuses to guess which one to update.
    #[error("Project {project_id} cannot contain more than 1 default approval rule")]
    DuplicateDefaultRule {
        /// Identifier of the offending project.
        project_id: u64,
        /// How many default rules were found.
        count: usize,
    },

    /// Clearing the existing access levels of a protected branch failed.
    ///
    /// The clear step has no accepted-failure path: re-applying grants on
    /// top of uncleared ones would accumulate access levels, so a rejected
    /// clear aborts the run before the re-apply is attempted.
    #[error("Project {project_id} failed to clear access levels for branch `{branch}`. Reason: \n{status} - {body}")]
    AccessLevelClearFailed {
        /// Identifier of the project being reconciled.
        project_id: u64,
        /// Branch whose protection record was being cleared.
        branch: String,
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A branch rule reached the apply step in a shape it cannot use.
    ///
    /// Configuration validation rejects these shapes up front; this variant
    /// covers rules constructed programmatically and handed to a manager
    /// directly.
    #[error("Project {project_id} has an unusable rule for branch `{branch}`: {reason}")]
    InvalidRule {
        /// Identifier of the project being reconciled.
        project_id: u64,
        /// Branch the rule applies to.
        branch: String,
        /// What is wrong with the rule.
        reason: String,
    },
}

/// Top-level error for a policy run.
///
/// Wraps the error families of the layers below so orchestration code and
/// the CLI handle one type. Every variant is transparent: the underlying
/// message is the message.
#[derive(Debug, Error)]
pub enum PolicyRollerError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Configuration(#[from] config_manager::ConfigurationError),

    /// A remote read call or the HTTP transport failed.
    #[error(transparent)]
    Gateway(#[from] gitlab_client::Error),

    /// A reconciliation step failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// The project selection tripped a guard.
    #[error(transparent)]
    Selection(#[from] config_manager::SelectionError),
}

/// Result type alias for policy-run operations.
pub type PolicyRollerResult<T> = Result<T, PolicyRollerError>;
