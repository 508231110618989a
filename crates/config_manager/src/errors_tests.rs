use super::*;
use std::error::Error as StdError;

#[test]
fn test_file_not_found_error() {
    let error = ConfigurationError::FileNotFound {
        path: "/etc/policy.toml".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Configuration file not found: /etc/policy.toml"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_invalid_configuration_error() {
    let error = ConfigurationError::InvalidConfiguration {
        field: "protected_branches".to_string(),
        reason: "more than one rule for branch `main`".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid configuration: protected_branches - more than one rule for branch `main`"
    );
}

#[test]
fn test_selection_error_messages() {
    assert_eq!(
        SelectionError::MutuallyExclusiveSelectors.to_string(),
        "Arguments `namespace_paths`, `project_ids` and `project_slugs` are mutually exclusive"
    );
    assert_eq!(
        SelectionError::SlugsWithoutNamespaces.to_string(),
        "Argument `project_slugs` should be specified with `namespace_paths` argument"
    );
}

#[test]
fn test_selection_error_converts_into_configuration_error() {
    let error: ConfigurationError = SelectionError::MutuallyExclusiveSelectors.into();

    assert!(matches!(
        error,
        ConfigurationError::Selection(SelectionError::MutuallyExclusiveSelectors)
    ));
    // Transparent: the display string is the inner error's
    assert_eq!(
        error.to_string(),
        SelectionError::MutuallyExclusiveSelectors.to_string()
    );
}

#[test]
fn test_errors_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigurationError>();
    assert_send_sync::<SelectionError>();
}
