use super::*;
use std::error::Error as StdError;

#[test]
fn test_auth_error() {
    let error = Error::AuthError("token is not a valid header value".to_string());

    // Test error message
    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitLab client: token is not a valid header value"
    );

    // Test error source
    assert!(error.source().is_none());
}

#[test]
fn test_invalid_base_url_error() {
    let error = Error::InvalidBaseUrl {
        url: "not a url".to_string(),
        reason: "relative URL without a base".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid GitLab base URL `not a url`: relative URL without a base"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_remote_call_failed_error() {
    let error = Error::RemoteCallFailed {
        path: "projects/7/approval_rules".to_string(),
        status: 404,
        body: "{\"message\":\"404 Project Not Found\"}".to_string(),
    };

    // The body is carried for reporting but kept out of the display string
    assert_eq!(
        error.to_string(),
        "Undesired (404) response from `projects/7/approval_rules`"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_deserialization_error_wraps_serde_json() {
    let serde_error = serde_json::from_str::<Vec<u64>>("not json").unwrap_err();
    let error = Error::from(serde_error);

    assert!(matches!(error, Error::Deserialization(_)));
    assert!(error
        .to_string()
        .starts_with("Failed to deserialize GitLab response:"));
    assert!(error.source().is_some());
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
