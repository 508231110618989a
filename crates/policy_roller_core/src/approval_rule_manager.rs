//! Default approval-rule reconciliation.
//!
//! This module provides the [`ApprovalRuleManager`] that converges each
//! project on exactly one any-approver approval rule.

use config_manager::ApprovalRuleSettings;
use gitlab_client::models::ANY_APPROVER_RULE_TYPE;
use gitlab_client::{ApprovalRulePayload, GitlabClient};
use tracing::{debug, info};

use crate::errors::{PolicyRollerResult, ReconcileError};
use crate::recorder::OutcomeRecorder;

/// Section label used in the run report.
const SECTION: &str = "Approval rules";

/// Status accepted when an existing rule is updated.
const UPDATED: &[u16] = &[200];

/// Status accepted when a new rule is created.
const CREATED: &[u16] = &[201];

/// Upserts the single default approval rule of each project.
///
/// The platform invariant is one any-approver rule per project. The
/// manager lists the existing rules and branches on how many carry the
/// any-approver type: one is updated in place, none means one is created,
/// and more than one is a data-integrity failure this tool reports rather
/// than repairs.
pub struct ApprovalRuleManager {
    /// GitLab client for API operations
    client: GitlabClient,
}

impl ApprovalRuleManager {
    /// Creates a new ApprovalRuleManager.
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Converges every project on the desired default approval rule.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::DuplicateDefaultRule`] without issuing any
    /// write when a project already holds more than one any-approver rule;
    /// rejected writes and listing failures abort the run as usual.
    pub async fn apply(
        &self,
        project_ids: &[u64],
        rule: &ApprovalRuleSettings,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        info!(project_count = project_ids.len(), "Applying approval rules");

        for &project_id in project_ids {
            let rules = self.client.list_approval_rules(project_id).await?;
            let default_rules: Vec<_> = rules
                .iter()
                .filter(|existing| existing.rule_type == ANY_APPROVER_RULE_TYPE)
                .collect();

            match default_rules.as_slice() {
                [existing] => {
                    debug!(
                        project_id,
                        rule_id = existing.id,
                        "Updating existing default approval rule"
                    );
                    let payload = ApprovalRulePayload {
                        id: Some(existing.id),
                        name: rule.name.clone(),
                        rule_type: rule.rule_type.clone(),
                        approvals_required: rule.approvals_required,
                    };
                    let response = self
                        .client
                        .update_approval_rule(project_id, existing.id, &payload)
                        .await?;
                    recorder.record(project_id, SECTION, &response, UPDATED)?;
                }
                [] => {
                    debug!(project_id, "Creating default approval rule");
                    let payload = ApprovalRulePayload {
                        id: None,
                        name: rule.name.clone(),
                        rule_type: rule.rule_type.clone(),
                        approvals_required: rule.approvals_required,
                    };
                    let response = self
                        .client
                        .create_approval_rule(project_id, &payload)
                        .await?;
                    recorder.record(project_id, SECTION, &response, CREATED)?;
                }
                found => {
                    return Err(ReconcileError::DuplicateDefaultRule {
                        project_id,
                        count: found.len(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "approval_rule_manager_tests.rs"]
mod tests;
