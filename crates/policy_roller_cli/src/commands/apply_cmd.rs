//! Policy application command module.
//!
//! This module handles applying the policy baseline to the selected GitLab
//! projects. It supports loading a policy from a TOML file, overriding the
//! target selection from command-line flags, and a debug mode that resolves
//! the targets without changing anything.
//!
//! ## Features
//!
//! - Policy file support (TOML format) layered over documented defaults
//! - Selection by project ids, namespace paths, or slugs
//! - Token authentication via flag or the `GITLAB_TOKEN` environment variable
//! - Colorized per-project report of every accepted change

use clap::Args;
use config_manager::{PolicyConfig, ProjectSelection};
use gitlab_client::GitlabClient;
use policy_roller_core::{apply_policies, resolve_projects};
use secrecy::SecretString;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::Error;
use crate::report;

#[cfg(test)]
#[path = "apply_cmd_tests.rs"]
mod tests;

/// Command-line arguments for the apply command.
///
/// Selection flags, when given, replace the policy file's entire selection
/// rather than merging with it, so the command line always describes the
/// full target set.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Base URL of the GitLab instance, e.g. `https://gitlab.example.com`.
    #[arg(long)]
    pub base_url: String,

    /// Personal access token used for every API call.
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Path to a TOML policy file overriding the default policy.
    #[arg(long)]
    pub config: Option<String>,

    /// Explicit ids of the projects to update.
    #[arg(long, value_delimiter = ',')]
    pub project_ids: Vec<u64>,

    /// Namespace paths whose projects are updated.
    #[arg(long, value_delimiter = ',')]
    pub namespace_paths: Vec<String>,

    /// Project slugs, resolved under the first namespace path.
    #[arg(long, value_delimiter = ',')]
    pub project_slugs: Vec<String>,

    /// Resolve and print the target projects without updating anything.
    #[arg(long)]
    pub debug: bool,
}

/// Execute the apply command
pub async fn execute(args: &ApplyArgs) -> Result<(), Error> {
    let output = run(args).await?;
    print!("{}", output);
    Ok(())
}

/// Runs the command and returns the rendered report.
async fn run(args: &ApplyArgs) -> Result<String, Error> {
    let config = effective_config(args)?;

    let token = SecretString::from(args.token.clone());
    let client = GitlabClient::new(&args.base_url, &token).map_err(Error::Client)?;

    if args.debug {
        let project_ids = resolve_projects(&client, &config.selection)
            .await
            .map_err(Error::Run)?;
        info!(
            project_count = project_ids.len(),
            "Debug mode, no section applied"
        );
        return Ok(report::render_targets(&project_ids));
    }

    let outcomes = apply_policies(&client, &config).await.map_err(Error::Run)?;
    Ok(report::render(&outcomes))
}

/// Builds the effective policy for this invocation.
///
/// The policy file (when given) is layered over the documented defaults,
/// then any selection flag replaces the file's selection wholesale. The
/// result is validated before it is returned, so a bad policy never reaches
/// the network.
fn effective_config(args: &ApplyArgs) -> Result<PolicyConfig, Error> {
    let mut config = match &args.config {
        Some(path) => PolicyConfig::from_toml_file(Path::new(path)).map_err(Error::Config)?,
        None => PolicyConfig::default(),
    };

    let flag_selection = ProjectSelection {
        project_ids: args.project_ids.clone(),
        namespace_paths: args.namespace_paths.clone(),
        project_slugs: args.project_slugs.clone(),
    };
    if !flag_selection.is_empty() {
        debug!("Replacing configured selection with command-line flags");
        config.selection = flag_selection;
    }

    config.validate().map_err(Error::Config)?;
    Ok(config)
}
