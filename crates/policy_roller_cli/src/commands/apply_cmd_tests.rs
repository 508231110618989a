use super::*;
use config_manager::{ConfigurationError, SelectionError};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_TOKEN: &str = "glpat-test-token";

fn args_for(base_url: &str) -> ApplyArgs {
    ApplyArgs {
        base_url: base_url.to_string(),
        token: TEST_TOKEN.to_string(),
        config: None,
        project_ids: Vec::new(),
        namespace_paths: Vec::new(),
        project_slugs: Vec::new(),
        debug: false,
    }
}

#[test]
fn test_effective_config_defaults_without_file_or_flags() {
    let args = args_for("https://gitlab.example.com");

    let config = effective_config(&args).unwrap();

    assert_eq!(config, PolicyConfig::default());
}

#[test]
fn test_effective_config_loads_the_policy_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[selection]\nproject_ids = [4]\n").unwrap();
    writeln!(file, "[approval_rule]\napprovals_required = 3").unwrap();

    let mut args = args_for("https://gitlab.example.com");
    args.config = file.path().to_str().map(|s| s.to_string());

    let config = effective_config(&args).unwrap();

    assert_eq!(config.selection.project_ids, vec![4]);
    assert_eq!(config.approval_rule.approvals_required, 3);
}

#[test]
fn test_selection_flags_replace_the_file_selection_wholesale() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[selection]\nnamespace_paths = [\"devops\"]").unwrap();

    let mut args = args_for("https://gitlab.example.com");
    args.config = file.path().to_str().map(|s| s.to_string());
    args.project_ids = vec![7];

    let config = effective_config(&args).unwrap();

    // The file's namespaces are gone, not merged with the flag ids
    assert_eq!(config.selection.project_ids, vec![7]);
    assert!(config.selection.namespace_paths.is_empty());
}

#[test]
fn test_effective_config_applies_the_selection_guards() {
    let mut args = args_for("https://gitlab.example.com");
    args.project_ids = vec![7];
    args.namespace_paths = vec!["devops".to_string()];

    let error = effective_config(&args).unwrap_err();

    assert!(matches!(
        error,
        Error::Config(ConfigurationError::Selection(
            SelectionError::MutuallyExclusiveSelectors
        ))
    ));
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_effective_config_rejects_a_missing_policy_file() {
    let mut args = args_for("https://gitlab.example.com");
    args.config = Some("no_such_policy.toml".to_string());

    let error = effective_config(&args).unwrap_err();

    assert!(matches!(
        error,
        Error::Config(ConfigurationError::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_run_applies_the_policy_and_renders_the_report() {
    colored::control::set_override(false);
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approvals"))
        .respond_with(ResponseTemplate::new(201).set_body_string("approvals"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/approval_rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approval_rules"))
        .respond_with(ResponseTemplate::new(201).set_body_string("rule"))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("settings"))
        .mount(&mock_server)
        .await;
    // No branch exists, so the default branch rules are all skipped
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/repository/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/protected_branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/7/push_rule"))
        .respond_with(ResponseTemplate::new(200).set_body_string("push"))
        .mount(&mock_server)
        .await;

    let mut args = args_for(&mock_server.uri());
    args.project_ids = vec![7];

    let output = run(&args).await.unwrap();

    assert!(output.starts_with("Project 7 successfully updated. \n"));
    assert!(output.contains("Approval settings: \napprovals\n"));
    assert!(output.contains("Push rules: \npush\n"));
    // Nothing was protected, so no branch write shows up in the report
    assert!(!output.contains("Protected branches"));
}

#[tokio::test]
async fn test_run_in_debug_mode_issues_no_requests_for_explicit_ids() {
    colored::control::set_override(false);
    let mock_server = MockServer::start().await;

    let mut args = args_for(&mock_server.uri());
    args.project_ids = vec![7, 12];
    args.debug = true;

    let output = run(&args).await.unwrap();

    assert_eq!(output, "Selected 2 projects. \n7\n12\n");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_in_debug_mode_resolves_namespaces_without_writing() {
    colored::control::set_override(false);
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 31, "path_with_namespace": "devops/billing"},
            {"id": 99, "path_with_namespace": "web/site"}
        ])))
        .mount(&mock_server)
        .await;

    let mut args = args_for(&mock_server.uri());
    args.namespace_paths = vec!["devops".to_string()];
    args.debug = true;

    let output = run(&args).await.unwrap();

    assert_eq!(output, "Selected 1 projects. \n31\n");
    // The listing was the only request
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_surfaces_the_first_rejection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approvals"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid"))
        .mount(&mock_server)
        .await;

    let mut args = args_for(&mock_server.uri());
    args.project_ids = vec![7];

    let error = run(&args).await.unwrap_err();

    assert!(matches!(error, Error::Run(_)));
    assert_eq!(
        error.to_string(),
        "Project 7 failed to update. Reason: \n400 - invalid"
    );
    assert_eq!(error.exit_code(), 1);
}
