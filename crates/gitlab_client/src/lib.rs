//! Crate for interacting with the GitLab REST API.
//!
//! This crate provides a thin client for making authenticated requests to a
//! GitLab instance using a personal access token. Read calls deserialize
//! into the typed models in [`models`]; write calls hand back the raw
//! status and body so callers decide what counts as success.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::ApiResponse;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Page size requested on every listing call.
///
/// Listings ask for one large page and never follow pagination cursors; an
/// instance holding more entries than this will be truncated.
pub const PER_PAGE: &str = "999";

/// A client for interacting with the GitLab API, authenticated with a
/// personal access token.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    http: reqwest::Client,
    api_root: String,
}

impl GitlabClient {
    /// Creates a new `GitlabClient` for the given instance.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root URL of the GitLab instance, e.g. `https://gitlab.example.com`.
    /// * `token` - Personal access token, sent as the `PRIVATE-TOKEN` header
    ///   on every request.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if the URL does not parse and
    /// `Error::AuthError` if the token cannot be used as a header value.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use gitlab_client::GitlabClient;
    /// use secrecy::SecretString;
    ///
    /// # fn example() -> Result<(), gitlab_client::Error> {
    /// let token = SecretString::from("glpat-...".to_string());
    /// let client = GitlabClient::new("https://gitlab.example.com", &token)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: &str, token: &SecretString) -> Result<Self, Error> {
        let parsed = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut token_value = HeaderValue::from_str(token.expose_secret())
            .map_err(|_| Error::AuthError("token is not a valid header value".to_string()))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("private-token"), token_value);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_root: format!("{}/api/v4", parsed.as_str().trim_end_matches('/')),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }

    /// Issues a GET request against an API path and deserializes the JSON
    /// response.
    ///
    /// The listing parameters (`per_page=999&page=1`) are always appended:
    /// the client requests a single large page and does not paginate
    /// further.
    ///
    /// # Arguments
    ///
    /// * `path` - API path relative to the `/api/v4` root, without a leading
    ///   slash.
    ///
    /// # Errors
    ///
    /// Returns `Error::RemoteCallFailed` for any response outside the 2xx
    /// range, carrying the path, status code and response body.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_json<T>(&self, path: &str) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(path = path, "Issuing GET request");

        let response = self
            .http
            .get(&url)
            .query(&[("per_page", PER_PAGE), ("page", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::RemoteCallFailed {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Lists every project visible to the token.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<models::Project>, Error> {
        let projects: Vec<models::Project> = self.get_json("projects").await?;
        info!(count = projects.len(), "Retrieved project listing");
        Ok(projects)
    }

    /// Looks up a single project by its fully qualified `namespace/slug` path.
    ///
    /// The path separator is percent-encoded so the whole path fits into one
    /// URL segment, as the platform requires.
    ///
    /// # Errors
    ///
    /// Returns `Error::RemoteCallFailed` if the project does not exist or is
    /// not visible to the token.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn project_by_path(&self, path: &str) -> Result<models::Project, Error> {
        let encoded = path.replace('/', "%2F");
        self.get_json(&format!("projects/{}", encoded)).await
    }

    /// Lists the repository branches of a project.
    #[instrument(skip(self))]
    pub async fn list_branches(&self, project_id: u64) -> Result<Vec<models::Branch>, Error> {
        self.get_json(&format!("projects/{}/repository/branches", project_id))
            .await
    }

    /// Lists the protection records of a project.
    #[instrument(skip(self))]
    pub async fn list_protected_branches(
        &self,
        project_id: u64,
    ) -> Result<Vec<models::ProtectedBranch>, Error> {
        self.get_json(&format!("projects/{}/protected_branches", project_id))
            .await
    }

    /// Lists the merge-request approval rules of a project.
    #[instrument(skip(self))]
    pub async fn list_approval_rules(
        &self,
        project_id: u64,
    ) -> Result<Vec<models::ApprovalRule>, Error> {
        self.get_json(&format!("projects/{}/approval_rules", project_id))
            .await
    }

    /// Overwrites the merge-request approval settings of a project.
    ///
    /// The endpoint replaces the full settings object on every call, so no
    /// read-before-write is needed.
    #[instrument(skip(self, settings))]
    pub async fn set_approval_settings(
        &self,
        project_id: u64,
        settings: &ApprovalSettingsUpdate,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}/approvals", project_id));
        let response = self.http.post(&url).json(settings).send().await?;
        Self::read_response(response).await
    }

    /// Creates a merge-request approval rule on a project.
    #[instrument(skip(self, rule))]
    pub async fn create_approval_rule(
        &self,
        project_id: u64,
        rule: &ApprovalRulePayload,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}/approval_rules", project_id));
        let response = self.http.post(&url).json(rule).send().await?;
        Self::read_response(response).await
    }

    /// Updates an existing merge-request approval rule in place.
    #[instrument(skip(self, rule), fields(rule_id = rule_id))]
    pub async fn update_approval_rule(
        &self,
        project_id: u64,
        rule_id: u64,
        rule: &ApprovalRulePayload,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}/approval_rules/{}", project_id, rule_id));
        let response = self.http.put(&url).json(rule).send().await?;
        Self::read_response(response).await
    }

    /// Updates the general settings of a project.
    #[instrument(skip(self, settings))]
    pub async fn update_project_settings(
        &self,
        project_id: u64,
        settings: &ProjectSettingsUpdate,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}", project_id));
        let response = self.http.put(&url).json(settings).send().await?;
        Self::read_response(response).await
    }

    /// Protects a branch, creating a new protection record.
    ///
    /// The creation endpoint takes its parameters as query parameters and
    /// honours a single access level per action; layered grants can only be
    /// configured afterwards through [`GitlabClient::update_protected_branch`].
    #[instrument(skip(self, params), fields(branch = %params.name))]
    pub async fn protect_branch(
        &self,
        project_id: u64,
        params: &ProtectBranchParams,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}/protected_branches", project_id));
        let response = self.http.post(&url).query(params).send().await?;
        Self::read_response(response).await
    }

    /// Patches an existing protection record.
    ///
    /// The update endpoint is additive: granting access levels never removes
    /// existing ones. Removal is expressed through destruction markers built
    /// with [`AccessLevelUpdate::destroy`].
    #[instrument(skip(self, update), fields(branch = %branch))]
    pub async fn update_protected_branch(
        &self,
        project_id: u64,
        branch: &str,
        update: &ProtectedBranchUpdate,
    ) -> Result<ApiResponse, Error> {
        let encoded = branch.replace('/', "%2F");
        let url = self.endpoint(&format!(
            "projects/{}/protected_branches/{}",
            project_id, encoded
        ));
        let response = self.http.patch(&url).json(update).send().await?;
        Self::read_response(response).await
    }

    /// Sets the push rule of a project.
    #[instrument(skip(self, rule))]
    pub async fn set_push_rule(
        &self,
        project_id: u64,
        rule: &PushRuleUpdate,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&format!("projects/{}/push_rule", project_id));
        let response = self.http.put(&url).json(rule).send().await?;
        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> Result<ApiResponse, Error> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Represents the merge-request approval settings of a project.
///
/// The endpoint overwrites all five toggles on every call, so none of the
/// fields is optional.
#[derive(Serialize, Debug, Clone)]
pub struct ApprovalSettingsUpdate {
    pub reset_approvals_on_push: bool,

    pub selective_code_owner_removals: bool,

    pub disable_overriding_approvers_per_merge_request: bool,

    pub merge_requests_author_approval: bool,

    pub merge_requests_disable_committers_approval: bool,
}

/// Represents a merge-request approval rule payload for create and update
/// calls.
#[derive(Serialize, Debug, Clone)]
pub struct ApprovalRulePayload {
    /// Id of the rule being updated; absent on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub name: String,

    pub rule_type: String,

    pub approvals_required: u32,
}

/// Represents the general project settings this tool manages.
///
/// The project resource accepts many more fields; only the merge-behavior
/// subset is written here. No default branch: converging it would need an
/// existence check first.
#[derive(Serialize, Debug, Clone)]
pub struct ProjectSettingsUpdate {
    pub allow_merge_on_skipped_pipeline: bool,

    pub only_allow_merge_if_all_discussions_are_resolved: bool,

    pub only_allow_merge_if_pipeline_succeeds: bool,

    pub remove_source_branch_after_merge: bool,

    pub squash_option: String,

    pub merge_method: String,
}

/// Represents a project push rule.
#[derive(Serialize, Debug, Clone)]
pub struct PushRuleUpdate {
    /// Pattern every pushed branch name must match
    pub branch_name_regex: String,
}

/// Query parameters for protecting a previously unprotected branch.
///
/// The creation endpoint accepts one access level per action; layered
/// grants require a follow-up patch.
#[derive(Serialize, Debug, Clone)]
pub struct ProtectBranchParams {
    pub name: String,

    pub push_access_level: u32,

    pub merge_access_level: u32,

    pub allow_force_push: bool,

    pub code_owner_approval_required: bool,
}

/// Body of a protected-branch patch.
///
/// Each access-level array may mix grants and destruction markers; empty
/// arrays are omitted entirely so an update never clobbers an action it
/// does not mention.
#[derive(Serialize, Default, Debug, Clone)]
pub struct ProtectedBranchUpdate {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_to_push: Vec<AccessLevelUpdate>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_to_merge: Vec<AccessLevelUpdate>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_to_unprotect: Vec<AccessLevelUpdate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_force_push: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_owner_approval_required: Option<bool>,
}

/// One entry of a protected-branch patch: either a new grant or a
/// destruction marker for an existing one.
#[derive(Serialize, Debug, Clone)]
pub struct AccessLevelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<u32>,

    #[serde(rename = "_destroy", skip_serializing_if = "Option::is_none")]
    pub destroy: Option<bool>,
}

impl AccessLevelUpdate {
    /// A marker destroying the existing grant with the given id.
    pub fn destroy(id: u64) -> Self {
        Self {
            id: Some(id),
            access_level: None,
            destroy: Some(true),
        }
    }

    /// A new grant at the given access level.
    pub fn grant(access_level: u32) -> Self {
        Self {
            id: None,
            access_level: Some(access_level),
            destroy: None,
        }
    }
}
