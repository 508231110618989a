use super::*;

#[test]
fn test_project_settings_defaults() {
    let settings = ProjectSettings::default();

    assert!(!settings.allow_merge_on_skipped_pipeline);
    assert!(settings.only_allow_merge_if_all_discussions_are_resolved);
    assert!(settings.only_allow_merge_if_pipeline_succeeds);
    assert!(settings.remove_source_branch_after_merge);
    assert_eq!(settings.squash_option, "default_on");
    assert_eq!(settings.merge_method, "ff");
}

#[test]
fn test_project_settings_partial_deserialization_keeps_defaults() {
    let settings: ProjectSettings = toml::from_str("merge_method = \"merge\"").unwrap();

    assert_eq!(settings.merge_method, "merge");
    assert_eq!(settings.squash_option, "default_on");
    assert!(settings.only_allow_merge_if_pipeline_succeeds);
}
