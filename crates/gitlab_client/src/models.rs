//! # Models
//!
//! Data models for the slice of the GitLab API this crate consumes: projects,
//! repository branches, protected-branch records and merge-request approval
//! rules. Only the fields reconciliation actually reads are modeled; the
//! platform sends far more.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// The rule-type category of the platform's default "any approver" rule.
pub const ANY_APPROVER_RULE_TYPE: &str = "any_approver";

/// Maps a numeric access level to the platform's role name.
///
/// Returns `None` for values between the documented thresholds.
///
/// # Examples
///
/// ```
/// use gitlab_client::models::role_name;
///
/// assert_eq!(role_name(40), Some("Maintainer"));
/// assert_eq!(role_name(41), None);
/// ```
pub fn role_name(access_level: u32) -> Option<&'static str> {
    match access_level {
        0 => Some("No access"),
        5 => Some("Minimal access"),
        10 => Some("Guest"),
        20 => Some("Reporter"),
        30 => Some("Developer"),
        40 => Some("Maintainer"),
        50 => Some("Owner"),
        _ => None,
    }
}

/// A raw write response: status code plus unparsed body.
///
/// Write calls hand their response back uninterpreted; deciding which
/// statuses count as success is the caller's job, not the client's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// A project on the GitLab instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    /// The platform-assigned numeric id of the project
    pub id: u64,
    /// Fully qualified path, `namespace/slug`
    pub path_with_namespace: String,
}

/// A repository branch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Branch {
    /// The name of the branch
    pub name: String,
}

/// A protection record for a branch.
///
/// The access-level lists carry the ids needed to destroy existing grants
/// when a protection record is updated in place.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProtectedBranch {
    /// Id of the protection record itself
    pub id: Option<u64>,
    /// Name of the protected branch
    pub name: String,
    /// Who may push, one entry per grant
    #[serde(default)]
    pub push_access_levels: Vec<ProtectedAccessLevel>,
    /// Who may merge, one entry per grant
    #[serde(default)]
    pub merge_access_levels: Vec<ProtectedAccessLevel>,
    /// Who may unprotect the branch; absent on older instances
    #[serde(default)]
    pub unprotect_access_levels: Vec<ProtectedAccessLevel>,
    /// Whether force pushes are allowed
    #[serde(default)]
    pub allow_force_push: bool,
    /// Whether code-owner approval is required
    #[serde(default)]
    pub code_owner_approval_required: bool,
}

/// One access-level grant on a protected branch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProtectedAccessLevel {
    /// Id of the grant, used for destruction markers
    pub id: Option<u64>,
    /// The numeric role threshold, absent for user/group grants
    pub access_level: Option<u32>,
    /// Human-readable description of the grant
    pub access_level_description: Option<String>,
}

/// A merge-request approval rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApprovalRule {
    /// Id of the rule
    pub id: u64,
    /// Display name of the rule
    pub name: String,
    /// Rule category, e.g. `any_approver`
    pub rule_type: String,
    /// Number of approvals the rule demands
    pub approvals_required: u32,
}
