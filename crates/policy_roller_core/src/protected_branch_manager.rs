//! Protected-branch reconciliation.
//!
//! This module provides the [`ProtectedBranchManager`], the most involved
//! of the section managers: it reconciles three sets keyed by branch name
//! (existing branches, existing protection records, desired rules) and
//! picks a create, update or skip path per desired rule.

use config_manager::{AccessLevelSpec, BranchRule};
use gitlab_client::models::{ProtectedAccessLevel, ProtectedBranch};
use gitlab_client::{AccessLevelUpdate, GitlabClient, ProtectBranchParams, ProtectedBranchUpdate};
use tracing::{debug, info};

use crate::errors::{PolicyRollerResult, ReconcileError};
use crate::recorder::OutcomeRecorder;

/// Section label used in the run report.
const SECTION: &str = "Protected branches";

/// Status accepted when a protection record is created.
const CREATED: &[u16] = &[201];

/// Status accepted when a protection record is patched.
const UPDATED: &[u16] = &[200];

/// Reconciles protected-branch rules across projects.
///
/// For each desired rule the manager takes one of three paths:
///
/// - the branch does not exist → skip silently; protection is never
///   created ahead of the branch itself.
/// - the branch exists and is unprotected → create a protection record.
/// - the branch exists and is protected → clear the existing access
///   levels, then re-apply the desired ones.
///
/// The clear-then-reapply split exists because the platform treats a
/// protection patch as "add access level": converging on an exact desired
/// set requires destroying every prior grant first, otherwise stale grants
/// accumulate across repeated runs.
pub struct ProtectedBranchManager {
    /// GitLab client for API operations
    client: GitlabClient,
}

impl ProtectedBranchManager {
    /// Creates a new ProtectedBranchManager.
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Reconciles every desired rule against every project in turn.
    ///
    /// Lists each project's branches and protection records once, then
    /// walks the desired rules in configuration order.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::AccessLevelClearFailed`] when a clear
    /// patch is rejected, [`ReconcileError::InvalidRule`] when a rule
    /// carries an empty access-level list, and the usual rejection or
    /// gateway failures otherwise. The first error aborts the run.
    pub async fn apply(
        &self,
        project_ids: &[u64],
        rules: &[BranchRule],
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        info!(
            project_count = project_ids.len(),
            rule_count = rules.len(),
            "Applying protected branches"
        );

        for &project_id in project_ids {
            let branches = self.client.list_branches(project_id).await?;
            let protected = self.client.list_protected_branches(project_id).await?;

            for rule in rules {
                if !branches.iter().any(|branch| branch.name == rule.name) {
                    debug!(project_id, branch = %rule.name, "Branch does not exist, skipping rule");
                    continue;
                }

                match protected.iter().find(|record| record.name == rule.name) {
                    Some(record) => {
                        self.reprotect(project_id, rule, record, recorder).await?;
                    }
                    None => {
                        self.protect(project_id, rule, recorder).await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Creates a protection record for a previously unprotected branch.
    ///
    /// The creation endpoint takes one access level per action as query
    /// parameters, so only the first entry of each desired list is honoured
    /// here; layered grants converge through the update path on the next
    /// run.
    async fn protect(
        &self,
        project_id: u64,
        rule: &BranchRule,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        let push = first_level(project_id, rule, &rule.push_access_levels, "push")?;
        let merge = first_level(project_id, rule, &rule.merge_access_levels, "merge")?;

        debug!(project_id, branch = %rule.name, "Protecting branch");

        let params = ProtectBranchParams {
            name: rule.name.clone(),
            push_access_level: push.access_level,
            merge_access_level: merge.access_level,
            allow_force_push: rule.allow_force_push,
            code_owner_approval_required: rule.code_owner_approval_required,
        };
        let response = self.client.protect_branch(project_id, &params).await?;
        recorder.record(project_id, SECTION, &response, CREATED)?;

        Ok(())
    }

    /// Converges an existing protection record on the desired rule.
    ///
    /// Two sequential patches: the first destroys every existing push,
    /// merge and unprotect grant by id; the second applies the desired
    /// grant arrays verbatim together with the two booleans. The clear
    /// patch must come back 200 outright; it is not routed through the
    /// recorder because a half-cleared record has no accepted-failure
    /// reading.
    async fn reprotect(
        &self,
        project_id: u64,
        rule: &BranchRule,
        record: &ProtectedBranch,
        recorder: &mut OutcomeRecorder,
    ) -> PolicyRollerResult<()> {
        first_level(project_id, rule, &rule.push_access_levels, "push")?;
        first_level(project_id, rule, &rule.merge_access_levels, "merge")?;

        debug!(project_id, branch = %rule.name, "Reprotecting branch");

        let clear = ProtectedBranchUpdate {
            allowed_to_push: destruction_markers(&record.push_access_levels),
            allowed_to_merge: destruction_markers(&record.merge_access_levels),
            allowed_to_unprotect: destruction_markers(&record.unprotect_access_levels),
            ..ProtectedBranchUpdate::default()
        };
        let response = self
            .client
            .update_protected_branch(project_id, &rule.name, &clear)
            .await?;
        if response.status != 200 {
            return Err(ReconcileError::AccessLevelClearFailed {
                project_id,
                branch: rule.name.clone(),
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let update = ProtectedBranchUpdate {
            allowed_to_push: grants(&rule.push_access_levels),
            allowed_to_merge: grants(&rule.merge_access_levels),
            allowed_to_unprotect: Vec::new(),
            allow_force_push: Some(rule.allow_force_push),
            code_owner_approval_required: Some(rule.code_owner_approval_required),
        };
        let response = self
            .client
            .update_protected_branch(project_id, &rule.name, &update)
            .await?;
        recorder.record(project_id, SECTION, &response, UPDATED)?;

        Ok(())
    }
}

/// First entry of a desired access-level list, or the rule-shape error
/// naming the action the list belongs to.
fn first_level<'a>(
    project_id: u64,
    rule: &BranchRule,
    levels: &'a [AccessLevelSpec],
    action: &str,
) -> Result<&'a AccessLevelSpec, ReconcileError> {
    levels.first().ok_or_else(|| ReconcileError::InvalidRule {
        project_id,
        branch: rule.name.clone(),
        reason: format!("no {} access levels configured", action),
    })
}

/// Destruction markers for every identified grant in an existing record.
fn destruction_markers(existing: &[ProtectedAccessLevel]) -> Vec<AccessLevelUpdate> {
    existing
        .iter()
        .filter_map(|entry| entry.id)
        .map(AccessLevelUpdate::destroy)
        .collect()
}

/// Grant entries for a desired access-level list.
fn grants(desired: &[AccessLevelSpec]) -> Vec<AccessLevelUpdate> {
    desired
        .iter()
        .map(|spec| AccessLevelUpdate::grant(spec.access_level))
        .collect()
}

#[cfg(test)]
#[path = "protected_branch_manager_tests.rs"]
mod tests;
