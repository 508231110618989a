//! Approval-settings reconciliation.
//!
//! This module provides the [`ApprovalSettingsManager`] that applies
//! merge-request approval settings across projects.

use config_manager::ApprovalSettings;
use gitlab_client::{ApprovalSettingsUpdate, GitlabClient};
use tracing::info;

use crate::errors::PolicyRollerResult;
use crate::recorder::OutcomeRecorder;

/// Section label used in the run report.
const SECTION: &str = "Approval settings";

/// Statuses accepted for the approval-settings write.
const ACCEPTED: &[u16] = &[201];

/// Applies merge-request approval settings across projects.
///
/// The write is a stateless upsert: the platform endpoint overwrites the
/// full settings object on every call, so no read-before-write or diff is
/// needed.
pub struct ApprovalSettingsManager {
    /// GitLab client for API operations
    client: GitlabClient,
}

impl ApprovalSettingsManager {
    /// Creates a new ApprovalSettingsManager.
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Applies the desired approval settings to every project in turn.
    ///
    /// # Errors
    ///
    /// The first rejected or failed write aborts the remaining projects.
    pub async fn apply(
        &self,
        project_ids: &[u64],
        settings: &ApprovalSettings,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        info!(
            project_count = project_ids.len(),
            "Applying approval settings"
        );

        let payload = ApprovalSettingsUpdate {
            reset_approvals_on_push: settings.reset_approvals_on_push,
            selective_code_owner_removals: settings.selective_code_owner_removals,
            disable_overriding_approvers_per_merge_request: settings
                .disable_overriding_approvers_per_merge_request,
            merge_requests_author_approval: settings.merge_requests_author_approval,
            merge_requests_disable_committers_approval: settings
                .merge_requests_disable_committers_approval,
        };

        for &project_id in project_ids {
            let response = self
                .client
                .set_approval_settings(project_id, &payload)
                .await?;
            recorder.record(project_id, SECTION, &response, ACCEPTED)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "approval_settings_manager_tests.rs"]
mod tests;
