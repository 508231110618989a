//! Push-rule reconciliation.

use config_manager::PushRuleSettings;
use gitlab_client::{GitlabClient, PushRuleUpdate};
use tracing::info;

use crate::errors::PolicyRollerResult;
use crate::recorder::OutcomeRecorder;

/// Section label used in the run report.
const SECTION: &str = "Push rules";

/// Statuses accepted for the push-rule write.
const ACCEPTED: &[u16] = &[200];

/// Applies the branch-naming push rule across projects.
///
/// The push rule is a single regex the platform enforces on pushed branch
/// names; the write is a stateless upsert like the other scalar sections.
pub struct PushRuleManager {
    /// GitLab client for API operations
    client: GitlabClient,
}

impl PushRuleManager {
    /// Creates a new PushRuleManager.
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Applies the desired push rule to every project in turn.
    ///
    /// # Errors
    ///
    /// The first rejected or failed write aborts the remaining projects.
    pub async fn apply(
        &self,
        project_ids: &[u64],
        settings: &PushRuleSettings,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        info!(project_count = project_ids.len(), "Applying push rules");

        let payload = PushRuleUpdate {
            branch_name_regex: settings.branch_name_regex.clone(),
        };

        for &project_id in project_ids {
            let response = self.client.set_push_rule(project_id, &payload).await?;
            recorder.record(project_id, SECTION, &response, ACCEPTED)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "push_rule_manager_tests.rs"]
mod tests;
