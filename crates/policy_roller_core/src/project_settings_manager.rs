//! General project-settings reconciliation.

use config_manager::ProjectSettings;
use gitlab_client::{GitlabClient, ProjectSettingsUpdate};
use tracing::info;

use crate::errors::PolicyRollerResult;
use crate::recorder::OutcomeRecorder;

/// Section label used in the run report.
const SECTION: &str = "Project settings";

/// Statuses accepted for the project-settings write.
const ACCEPTED: &[u16] = &[200];

/// Applies general merge and pipeline settings across projects.
///
/// The write is a stateless upsert against the project resource. Default
/// branches are deliberately not managed here: converging a default branch
/// safely needs an existence check first, which this tool does not perform.
pub struct ProjectSettingsManager {
    /// GitLab client for API operations
    client: GitlabClient,
}

impl ProjectSettingsManager {
    /// Creates a new ProjectSettingsManager.
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Applies the desired project settings to every project in turn.
    ///
    /// # Errors
    ///
    /// The first rejected or failed write aborts the remaining projects.
    pub async fn apply(
        &self,
        project_ids: &[u64],
        settings: &ProjectSettings,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        info!(
            project_count = project_ids.len(),
            "Applying project settings"
        );

        let payload = ProjectSettingsUpdate {
            allow_merge_on_skipped_pipeline: settings.allow_merge_on_skipped_pipeline,
            only_allow_merge_if_all_discussions_are_resolved: settings
                .only_allow_merge_if_all_discussions_are_resolved,
            only_allow_merge_if_pipeline_succeeds: settings.only_allow_merge_if_pipeline_succeeds,
            remove_source_branch_after_merge: settings.remove_source_branch_after_merge,
            squash_option: settings.squash_option.clone(),
            merge_method: settings.merge_method.clone(),
        };

        for &project_id in project_ids {
            let response = self
                .client
                .update_project_settings(project_id, &payload)
                .await?;
            recorder.record(project_id, SECTION, &response, ACCEPTED)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "project_settings_manager_tests.rs"]
mod tests;
