//! # PolicyRoller Core
//!
//! This crate provides the core reconciliation logic for PolicyRoller, a tool
//! that applies a declarative policy baseline to many GitLab projects in one
//! run.
//!
//! ## Overview
//!
//! PolicyRoller Core handles the complete workflow of a policy run:
//! 1. Target resolution from ids, namespaces or slugs ([`resolve_projects`])
//! 2. Merge-request approval settings
//! 3. The default any-approver approval rule
//! 4. General project settings
//! 5. Protected-branch reconciliation
//! 6. Push rules
//!
//! Sections are applied in that fixed order, each section across every
//! target project before the next section starts, and the first failure of
//! any kind aborts the whole run.
//!
//! ## Main Functions
//!
//! The primary entry points are:
//! - [`apply_policies`] - Run every policy section against the selected projects
//! - [`OutcomeRecorder`] - Accumulates accepted responses for the final report
//! - [`PolicyRollerError`] - Umbrella error covering every failure mode
//!
//! ## Examples
//!
//! ```no_run
//! use config_manager::PolicyConfig;
//! use gitlab_client::GitlabClient;
//! use policy_roller_core::apply_policies;
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from("glpat-example".to_string());
//! let client = GitlabClient::new("https://gitlab.example.com", &token)?;
//! let config = PolicyConfig::default();
//!
//! let outcomes = apply_policies(&client, &config).await?;
//! print!("{}", outcomes.render());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`PolicyRollerResult`]. Rejected responses surface
//! as [`ReconcileError`] variants carrying the project id and the raw
//! response, so a run that stops midway says exactly which call failed and
//! why. Nothing is retried and nothing is rolled back; a rerun converges the
//! remaining projects.

use config_manager::{PolicyConfig, PolicySection};
use gitlab_client::GitlabClient;
use tracing::info;

/// Error types for reconciliation failures
pub mod errors;

/// Target-project resolution from the configured selection
pub mod locator;

/// Accumulation and rendering of accepted responses
pub mod recorder;

/// Merge-request approval settings section
pub mod approval_settings_manager;

/// Default approval rule section
pub mod approval_rule_manager;

/// General project settings section
pub mod project_settings_manager;

/// Protected-branch reconciliation section
pub mod protected_branch_manager;

/// Push rule section
pub mod push_rule_manager;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

// Re-export for convenient access
pub use approval_rule_manager::ApprovalRuleManager;
pub use approval_settings_manager::ApprovalSettingsManager;
pub use errors::{PolicyRollerError, PolicyRollerResult, ReconcileError};
pub use locator::resolve_projects;
pub use project_settings_manager::ProjectSettingsManager;
pub use protected_branch_manager::ProtectedBranchManager;
pub use push_rule_manager::PushRuleManager;
pub use recorder::{OutcomeRecorder, ProjectOutcome, SectionOutcome};

/// Applies every policy section to the projects the configuration selects.
///
/// Targets are resolved once up front, then each section runs across the
/// full target list before the next section starts. The returned recorder
/// holds one entry per accepted write, newest first within a section, ready
/// for [`OutcomeRecorder::render`].
///
/// # Errors
///
/// Returns the first failure encountered: a selection guard violation, a
/// gateway error, or a [`ReconcileError`] for a rejected update. Writes that
/// were already accepted stay in effect; the error reports what stopped the
/// run.
pub async fn apply_policies(
    client: &GitlabClient,
    config: &PolicyConfig,
) -> PolicyRollerResult<OutcomeRecorder> {
    let project_ids = resolve_projects(client, &config.selection).await?;
    info!(project_count = project_ids.len(), "Starting policy run");

    let mut recorder = OutcomeRecorder::new();
    for section in config.sections() {
        match section {
            PolicySection::ApprovalSettings(settings) => {
                ApprovalSettingsManager::new(client.clone())
                    .apply(&project_ids, &settings, &mut recorder)
                    .await?;
            }
            PolicySection::ApprovalRules(rule) => {
                ApprovalRuleManager::new(client.clone())
                    .apply(&project_ids, &rule, &mut recorder)
                    .await?;
            }
            PolicySection::ProjectSettings(settings) => {
                ProjectSettingsManager::new(client.clone())
                    .apply(&project_ids, &settings, &mut recorder)
                    .await?;
            }
            PolicySection::ProtectedBranches(rules) => {
                ProtectedBranchManager::new(client.clone())
                    .apply(&project_ids, &rules, &mut recorder)
                    .await?;
            }
            PolicySection::PushRules(settings) => {
                PushRuleManager::new(client.clone())
                    .apply(&project_ids, &settings, &mut recorder)
                    .await?;
            }
        }
    }

    info!(
        project_count = recorder.outcomes().len(),
        "Policy run finished"
    );
    Ok(recorder)
}
