//! Target-project resolution.
//!
//! Translates a [`ProjectSelection`] into the concrete project identifiers
//! a run operates on. Resolution happens once, before any section is
//! applied, and the guards run before any network access.

use config_manager::ProjectSelection;
use gitlab_client::GitlabClient;
use tracing::{debug, info};

use crate::errors::PolicyRollerResult;

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;

/// Resolves a project selection into project identifiers.
///
/// Selection modes, in precedence order:
///
/// 1. Slugs: each slug is looked up as `{first namespace}/{slug}` with a
///    direct single-project call. Only the first namespace path is used.
/// 2. Namespace paths: the full project listing is filtered to projects
///    whose leading path segment is one of the requested namespaces.
/// 3. Explicit ids: returned verbatim, no network access.
///
/// An empty selection resolves to no projects; it does not mean "all
/// projects".
///
/// # Errors
///
/// Returns the selection guard violation when ids and namespaces are
/// combined or slugs appear without a namespace, before any request is
/// made; lookup and listing failures propagate as gateway errors.
pub async fn resolve_projects(
    client: &GitlabClient,
    selection: &ProjectSelection,
) -> PolicyRollerResult<Vec<u64>> {
    selection.validate()?;

    if let Some(namespace) = selection.namespace_paths.first() {
        if !selection.project_slugs.is_empty() {
            let mut project_ids = Vec::with_capacity(selection.project_slugs.len());
            for slug in &selection.project_slugs {
                let project = client
                    .project_by_path(&format!("{}/{}", namespace, slug))
                    .await?;
                debug!(slug = %slug, project_id = project.id, "Resolved project slug");
                project_ids.push(project.id);
            }

            info!(count = project_ids.len(), "Resolved projects from slugs");
            return Ok(project_ids);
        }

        let projects = client.list_projects().await?;
        let project_ids: Vec<u64> = projects
            .into_iter()
            .filter(|project| {
                let leading = project.path_with_namespace.split('/').next().unwrap_or("");
                selection
                    .namespace_paths
                    .iter()
                    .any(|namespace_path| namespace_path == leading)
            })
            .map(|project| project.id)
            .collect();

        info!(
            count = project_ids.len(),
            "Resolved projects from namespace paths"
        );
        return Ok(project_ids);
    }

    Ok(selection.project_ids.clone())
}
