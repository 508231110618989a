//! Protected-branch rules.

use gitlab_client::models::role_name;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "protected_branch_tests.rs"]
mod tests;

/// One access-level grant in a desired branch rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLevelSpec {
    /// Numeric role threshold gating the action
    pub access_level: u32,

    /// Optional human-readable label for the grant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level_description: Option<String>,
}

impl AccessLevelSpec {
    /// A grant at the given level, labeled with the platform role name
    /// when the level matches a documented threshold.
    pub fn new(access_level: u32) -> Self {
        Self {
            access_level,
            access_level_description: role_name(access_level).map(str::to_string),
        }
    }
}

/// The desired protection state of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRule {
    /// Name of the branch the rule applies to
    pub name: String,

    /// Who may push, strongest grant first
    pub push_access_levels: Vec<AccessLevelSpec>,

    /// Who may merge, strongest grant first
    pub merge_access_levels: Vec<AccessLevelSpec>,

    /// Whether force pushes are allowed
    pub allow_force_push: bool,

    /// Whether code-owner approval is required
    pub code_owner_approval_required: bool,
}

impl BranchRule {
    /// A rule locking a branch down: nobody pushes, maintainers merge, no
    /// force pushes, no code-owner requirement.
    pub fn locked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            push_access_levels: vec![AccessLevelSpec {
                access_level: 0,
                access_level_description: Some("No one".to_string()),
            }],
            merge_access_levels: vec![AccessLevelSpec {
                access_level: 40,
                access_level_description: Some("Maintainers".to_string()),
            }],
            allow_force_push: false,
            code_owner_approval_required: false,
        }
    }

    /// The default rule set: `main`, `dev` and `master`, each locked.
    pub fn default_set() -> Vec<Self> {
        vec![Self::locked("main"), Self::locked("dev"), Self::locked("master")]
    }

    /// Checks the rule's shape.
    ///
    /// Both access-level lists must be non-empty (the creation call needs a
    /// first entry of each) and every level must be a documented role
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidConfiguration` naming the branch
    /// and the offending part.
    pub fn validate(&self) -> ConfigurationResult<()> {
        if self.push_access_levels.is_empty() {
            return Err(self.shape_error("no push access levels configured"));
        }
        if self.merge_access_levels.is_empty() {
            return Err(self.shape_error("no merge access levels configured"));
        }

        for spec in self
            .push_access_levels
            .iter()
            .chain(&self.merge_access_levels)
        {
            if role_name(spec.access_level).is_none() {
                return Err(self.shape_error(&format!(
                    "access level {} is not a documented role threshold",
                    spec.access_level
                )));
            }
        }

        Ok(())
    }

    fn shape_error(&self, reason: &str) -> ConfigurationError {
        ConfigurationError::InvalidConfiguration {
            field: "protected_branches".to_string(),
            reason: format!("rule for branch `{}`: {}", self.name, reason),
        }
    }
}
