use super::*;

#[test]
fn test_empty_selection_is_valid() {
    let selection = ProjectSelection::default();

    assert!(selection.validate().is_ok());
    assert!(selection.is_empty());
}

#[test]
fn test_explicit_ids_alone_are_valid() {
    let selection = ProjectSelection {
        project_ids: vec![1, 2, 3],
        ..Default::default()
    };

    assert!(selection.validate().is_ok());
    assert!(!selection.is_empty());
}

#[test]
fn test_namespaces_alone_are_valid() {
    let selection = ProjectSelection {
        namespace_paths: vec!["devops".to_string()],
        ..Default::default()
    };

    assert!(selection.validate().is_ok());
}

#[test]
fn test_slugs_with_namespaces_are_valid() {
    let selection = ProjectSelection {
        namespace_paths: vec!["devops".to_string()],
        project_slugs: vec!["billing".to_string()],
        ..Default::default()
    };

    assert!(selection.validate().is_ok());
}

#[test]
fn test_ids_and_namespaces_are_mutually_exclusive() {
    let selection = ProjectSelection {
        project_ids: vec![1],
        namespace_paths: vec!["devops".to_string()],
        ..Default::default()
    };

    assert_eq!(
        selection.validate(),
        Err(SelectionError::MutuallyExclusiveSelectors)
    );
}

#[test]
fn test_slugs_without_namespaces_are_rejected() {
    let selection = ProjectSelection {
        project_slugs: vec!["billing".to_string()],
        ..Default::default()
    };

    assert_eq!(
        selection.validate(),
        Err(SelectionError::SlugsWithoutNamespaces)
    );
}

#[test]
fn test_ids_with_slugs_but_no_namespaces_are_rejected() {
    // The ids/namespaces guard passes, the slug guard still fires
    let selection = ProjectSelection {
        project_ids: vec![1],
        project_slugs: vec!["billing".to_string()],
        ..Default::default()
    };

    assert_eq!(
        selection.validate(),
        Err(SelectionError::SlugsWithoutNamespaces)
    );
}

#[test]
fn test_selection_deserializes_with_missing_fields() {
    let selection: ProjectSelection = toml::from_str("project_ids = [7]").unwrap();

    assert_eq!(selection.project_ids, vec![7]);
    assert!(selection.namespace_paths.is_empty());
    assert!(selection.project_slugs.is_empty());
}
