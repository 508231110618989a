//! Push-rule settings.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "push_rule_tests.rs"]
mod tests;

/// Default branch-name pattern: ticket-style work branches
/// (`feature/ABC-123`, optionally suffixed with `_description`) plus the
/// two long-lived environment branches.
pub const DEFAULT_BRANCH_NAME_REGEX: &str =
    r"((feature|hotfix|bugfix|refactor)(\/)([A-Za-z]{3,5}-[0-9]{3,5})((_)(.*))*)|(dev|prod)";

/// Desired push rule of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushRuleSettings {
    /// Pattern every pushed branch name must match
    pub branch_name_regex: String,
}

impl Default for PushRuleSettings {
    fn default() -> Self {
        Self {
            branch_name_regex: DEFAULT_BRANCH_NAME_REGEX.to_string(),
        }
    }
}
