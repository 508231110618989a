//! Configuration management for PolicyRoller.
//!
//! This crate owns the declarative side of a policy run: the desired values
//! for every policy section, the selection of target projects, and the
//! validation that happens before a single network call is made. The
//! reconciliation logic itself lives in `policy_roller_core`; this crate
//! only describes what the projects should look like.
//!
//! Configuration is layered. [`PolicyConfig::default()`] carries the
//! documented platform defaults for every section, a TOML policy file
//! overrides any subset of them, and the CLI layer may replace the project
//! selection wholesale from command-line flags.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod errors;
pub mod selection;
pub mod settings;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

// Re-export for convenient access
pub use errors::{ConfigurationError, ConfigurationResult, SelectionError};
pub use selection::ProjectSelection;
pub use settings::{
    AccessLevelSpec, ApprovalRuleSettings, ApprovalSettings, BranchRule, ProjectSettings,
    PushRuleSettings, DEFAULT_BRANCH_NAME_REGEX,
};

/// The complete desired state for one policy run.
///
/// Every field has a documented default, so an empty TOML document is a
/// valid policy file: it selects nothing and describes the stock policy.
/// Partial files override only the tables they mention.
///
/// # Examples
///
/// ```rust
/// use config_manager::PolicyConfig;
///
/// let toml = r#"
///     [selection]
///     project_ids = [11, 12]
///
///     [approval_rule]
///     approvals_required = 2
/// "#;
///
/// let config: PolicyConfig = toml::from_str(toml).expect("Failed to parse");
/// assert_eq!(config.selection.project_ids, vec![11, 12]);
/// assert_eq!(config.approval_rule.approvals_required, 2);
/// // Untouched sections keep their defaults.
/// assert_eq!(config.protected_branches.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Which projects the run targets.
    ///
    /// See [`ProjectSelection`] for the three selection modes and the
    /// guards between them.
    pub selection: ProjectSelection,

    /// Merge-request approval behaviour applied to every target project.
    pub approval_settings: ApprovalSettings,

    /// The single default approval rule each target project must carry.
    pub approval_rule: ApprovalRuleSettings,

    /// Protected-branch rules, one entry per branch name.
    ///
    /// Branch names must be unique within the list; [`PolicyConfig::validate`]
    /// rejects duplicates because later entries would silently win.
    pub protected_branches: Vec<BranchRule>,

    /// General merge and pipeline settings applied to every target project.
    pub project_settings: ProjectSettings,

    /// The branch-naming push rule applied to every target project.
    pub push_rule: PushRuleSettings,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            selection: ProjectSelection::default(),
            approval_settings: ApprovalSettings::default(),
            approval_rule: ApprovalRuleSettings::default(),
            protected_branches: BranchRule::default_set(),
            project_settings: ProjectSettings::default(),
            push_rule: PushRuleSettings::default(),
        }
    }
}

impl PolicyConfig {
    /// Loads a policy configuration from a TOML file.
    ///
    /// The file may override any subset of the defaults; tables it does not
    /// mention keep their documented values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::FileNotFound`] when the path does not
    /// exist, [`ConfigurationError::FileAccessError`] when it cannot be
    /// read, and [`ConfigurationError::ParseError`] when the content is not
    /// valid TOML for this structure.
    pub fn from_toml_file(path: &Path) -> ConfigurationResult<Self> {
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
            path: path.display().to_string(),
            reason: format!("{}", e),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigurationError::ParseError {
            reason: format!("{}: {}", path.display(), e),
        })?;

        debug!(
            "Loaded policy configuration from {} ({} protected branch rules)",
            path.display(),
            config.protected_branches.len()
        );

        Ok(config)
    }

    /// Checks the configuration for problems detectable without network
    /// access.
    ///
    /// Validates the selection guards, rejects duplicate branch names in
    /// `protected_branches`, checks every branch rule's access-level
    /// sequences, and verifies that the push-rule pattern compiles as a
    /// regular expression.
    pub fn validate(&self) -> ConfigurationResult<()> {
        self.selection.validate()?;

        let mut seen = HashSet::new();
        for rule in &self.protected_branches {
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigurationError::InvalidConfiguration {
                    field: "protected_branches".to_string(),
                    reason: format!("branch `{}` is listed more than once", rule.name),
                });
            }

            rule.validate()?;
        }

        if let Err(e) = Regex::new(&self.push_rule.branch_name_regex) {
            return Err(ConfigurationError::InvalidConfiguration {
                field: "push_rule.branch_name_regex".to_string(),
                reason: format!("{}", e),
            });
        }

        Ok(())
    }

    /// Returns the policy sections in the order they are applied.
    ///
    /// The order is fixed: approval settings, then the approval rule, then
    /// project settings, then protected branches, then push rules. Each
    /// section carries its desired values so callers can dispatch without
    /// reaching back into the configuration.
    pub fn sections(&self) -> Vec<PolicySection> {
        vec![
            PolicySection::ApprovalSettings(self.approval_settings.clone()),
            PolicySection::ApprovalRules(self.approval_rule.clone()),
            PolicySection::ProjectSettings(self.project_settings.clone()),
            PolicySection::ProtectedBranches(self.protected_branches.clone()),
            PolicySection::PushRules(self.push_rule.clone()),
        ]
    }
}

/// One policy section together with its desired values.
///
/// The set of sections is closed: adding a section means adding a variant
/// here and a matching manager in the core crate, and the compiler points
/// at every dispatch site that needs updating.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicySection {
    /// Merge-request approval behaviour.
    ApprovalSettings(ApprovalSettings),
    /// The default any-approver approval rule.
    ApprovalRules(ApprovalRuleSettings),
    /// General merge and pipeline settings.
    ProjectSettings(ProjectSettings),
    /// Protected-branch rules.
    ProtectedBranches(Vec<BranchRule>),
    /// The branch-naming push rule.
    PushRules(PushRuleSettings),
}
