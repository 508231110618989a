use super::*;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_TOKEN: &str = "glpat-test-token";

fn test_client(server: &MockServer) -> GitlabClient {
    let token = SecretString::from(TEST_TOKEN.to_string());
    GitlabClient::new(&server.uri(), &token).expect("client should build against the mock server")
}

#[tokio::test]
async fn test_apply_posts_settings_for_every_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approvals"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{\"project\":7}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/8/approvals"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{\"project\":8}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = ApprovalSettingsManager::new(test_client(&mock_server));
    let mut recorder = OutcomeRecorder::new();

    manager
        .apply(&[7, 8], &ApprovalSettings::default(), &mut recorder)
        .await
        .unwrap();

    let outcomes = recorder.outcomes();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].project_id, 7);
    assert_eq!(outcomes[0].sections[0].section, "Approval settings");
    assert_eq!(outcomes[0].sections[0].body, "{\"project\":7}");
    assert_eq!(outcomes[1].project_id, 8);
}

#[tokio::test]
async fn test_apply_sends_the_configured_toggles() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approvals"))
        .and(body_partial_json(json!({
            "reset_approvals_on_push": true,
            "disable_overriding_approvers_per_merge_request": false,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = ApprovalSettings {
        reset_approvals_on_push: true,
        disable_overriding_approvers_per_merge_request: false,
        ..ApprovalSettings::default()
    };
    let manager = ApprovalSettingsManager::new(test_client(&mock_server));
    let mut recorder = OutcomeRecorder::new();

    manager.apply(&[7], &settings, &mut recorder).await.unwrap();
}

#[tokio::test]
async fn test_apply_rejects_statuses_other_than_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/approvals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    // The second project must never be reached after the rejection
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/8/approvals"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let manager = ApprovalSettingsManager::new(test_client(&mock_server));
    let mut recorder = OutcomeRecorder::new();

    let error = manager
        .apply(&[7, 8], &ApprovalSettings::default(), &mut recorder)
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Project 7 failed to update. Reason: \n200 - {\"ok\":true}"
    );
    assert!(recorder.is_empty());
}

#[tokio::test]
async fn test_apply_with_no_projects_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let manager = ApprovalSettingsManager::new(test_client(&mock_server));
    let mut recorder = OutcomeRecorder::new();

    manager
        .apply(&[], &ApprovalSettings::default(), &mut recorder)
        .await
        .unwrap();

    assert!(recorder.is_empty());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
