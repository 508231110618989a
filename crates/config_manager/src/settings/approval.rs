//! Merge-request approval settings.

use gitlab_client::models::ANY_APPROVER_RULE_TYPE;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "approval_tests.rs"]
mod tests;

/// Desired merge-request approval settings.
///
/// Applied as a whole: the platform endpoint overwrites all five toggles
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalSettings {
    /// Drop earlier approvals when new commits are pushed
    pub reset_approvals_on_push: bool,

    /// Only remove the approvals of code owners whose files changed
    pub selective_code_owner_removals: bool,

    /// Forbid editing approval rules per merge request
    pub disable_overriding_approvers_per_merge_request: bool,

    /// Let merge-request authors approve their own requests
    pub merge_requests_author_approval: bool,

    /// Forbid approval by users who committed to the source branch
    pub merge_requests_disable_committers_approval: bool,
}

impl Default for ApprovalSettings {
    fn default() -> Self {
        Self {
            reset_approvals_on_push: false,
            selective_code_owner_removals: false,
            disable_overriding_approvers_per_merge_request: true,
            merge_requests_author_approval: false,
            merge_requests_disable_committers_approval: false,
        }
    }
}

/// The desired default approval rule.
///
/// A project may hold at most one rule of the default category; the
/// reconciler updates the existing one in place or creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalRuleSettings {
    /// Display name of the rule
    pub name: String,

    /// Rule category; the singleton logic keys on `any_approver`
    pub rule_type: String,

    /// Number of approvals the rule demands
    pub approvals_required: u32,
}

impl Default for ApprovalRuleSettings {
    fn default() -> Self {
        Self {
            name: "Any name".to_string(),
            rule_type: ANY_APPROVER_RULE_TYPE.to_string(),
            approvals_required: 1,
        }
    }
}
