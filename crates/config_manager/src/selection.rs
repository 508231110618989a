//! Project selection configuration.

use serde::{Deserialize, Serialize};

use crate::errors::SelectionError;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

/// Selects the projects a run operates on.
///
/// Exactly one of three modes applies: explicit project ids, namespace
/// paths, or project slugs looked up under the first namespace path. An
/// empty selection resolves to no projects, never to all projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectSelection {
    /// Explicit project ids to operate on
    pub project_ids: Vec<u64>,

    /// Namespace paths whose projects are selected
    pub namespace_paths: Vec<String>,

    /// Project slugs, each resolved as `{first namespace}/{slug}`
    pub project_slugs: Vec<String>,
}

impl ProjectSelection {
    /// Checks the selection guards.
    ///
    /// Runs entirely locally; a selection that trips a guard must stop the
    /// run before the first remote call.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::MutuallyExclusiveSelectors`] when both explicit
    ///   ids and namespace paths are given.
    /// - [`SelectionError::SlugsWithoutNamespaces`] when slugs are given
    ///   without the namespace path they resolve against.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if !self.project_ids.is_empty() && !self.namespace_paths.is_empty() {
            return Err(SelectionError::MutuallyExclusiveSelectors);
        }

        if !self.project_slugs.is_empty() && self.namespace_paths.is_empty() {
            return Err(SelectionError::SlugsWithoutNamespaces);
        }

        Ok(())
    }

    /// Returns `true` when no selector is populated.
    pub fn is_empty(&self) -> bool {
        self.project_ids.is_empty()
            && self.namespace_paths.is_empty()
            && self.project_slugs.is_empty()
    }
}
