//! General project settings.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

/// Desired general settings of a project.
///
/// The subset of the project resource this tool manages; everything else
/// on the project is left untouched. There is deliberately no default
/// branch here: setting one safely requires checking that the branch
/// exists first, which the reconciler does not do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Allow merging when the pipeline was skipped
    pub allow_merge_on_skipped_pipeline: bool,

    /// Require every discussion to be resolved before merging
    pub only_allow_merge_if_all_discussions_are_resolved: bool,

    /// Require a green pipeline before merging
    pub only_allow_merge_if_pipeline_succeeds: bool,

    /// Delete the source branch after merging by default
    pub remove_source_branch_after_merge: bool,

    /// Squash behavior offered on merge requests
    pub squash_option: String,

    /// Merge strategy of the project
    pub merge_method: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            allow_merge_on_skipped_pipeline: false,
            only_allow_merge_if_all_discussions_are_resolved: true,
            only_allow_merge_if_pipeline_succeeds: true,
            remove_source_branch_after_merge: true,
            squash_option: "default_on".to_string(),
            merge_method: "ff".to_string(),
        }
    }
}
