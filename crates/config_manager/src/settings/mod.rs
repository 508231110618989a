//! Policy setting types.
//!
//! This module contains the desired-state types for the five policy
//! sections a run can reconcile. Every type carries the documented
//! platform defaults through its `Default` implementation.

pub mod approval;
pub mod project;
pub mod protected_branch;
pub mod push_rule;

// Re-export all types for convenient access
pub use approval::{ApprovalRuleSettings, ApprovalSettings};
pub use project::ProjectSettings;
pub use protected_branch::{AccessLevelSpec, BranchRule};
pub use push_rule::{PushRuleSettings, DEFAULT_BRANCH_NAME_REGEX};
