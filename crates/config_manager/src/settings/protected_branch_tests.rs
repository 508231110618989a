use super::*;

#[test]
fn test_access_level_spec_labels_documented_thresholds() {
    let spec = AccessLevelSpec::new(40);

    assert_eq!(spec.access_level, 40);
    assert_eq!(spec.access_level_description.as_deref(), Some("Maintainer"));
}

#[test]
fn test_default_set_covers_the_three_long_lived_branches() {
    let rules = BranchRule::default_set();

    let names: Vec<&str> = rules.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, vec!["main", "dev", "master"]);

    for rule in &rules {
        assert_eq!(rule.push_access_levels[0].access_level, 0);
        assert_eq!(
            rule.push_access_levels[0].access_level_description.as_deref(),
            Some("No one")
        );
        assert_eq!(rule.merge_access_levels[0].access_level, 40);
        assert_eq!(
            rule.merge_access_levels[0].access_level_description.as_deref(),
            Some("Maintainers")
        );
        assert!(!rule.allow_force_push);
        assert!(!rule.code_owner_approval_required);
    }
}

#[test]
fn test_locked_rule_validates() {
    assert!(BranchRule::locked("main").validate().is_ok());
}

#[test]
fn test_rule_without_push_levels_is_rejected() {
    let mut rule = BranchRule::locked("main");
    rule.push_access_levels.clear();

    let error = rule.validate().unwrap_err();
    assert!(error.to_string().contains("no push access levels"));
}

#[test]
fn test_rule_without_merge_levels_is_rejected() {
    let mut rule = BranchRule::locked("main");
    rule.merge_access_levels.clear();

    let error = rule.validate().unwrap_err();
    assert!(error.to_string().contains("no merge access levels"));
}

#[test]
fn test_rule_with_undocumented_access_level_is_rejected() {
    let mut rule = BranchRule::locked("main");
    rule.merge_access_levels = vec![AccessLevelSpec {
        access_level: 35,
        access_level_description: None,
    }];

    let error = rule.validate().unwrap_err();
    assert!(error.to_string().contains("access level 35"));
}

#[test]
fn test_rule_deserializes_from_toml() {
    let rule: BranchRule = toml::from_str(
        r#"
        name = "release"
        allow_force_push = false
        code_owner_approval_required = true

        [[push_access_levels]]
        access_level = 40

        [[merge_access_levels]]
        access_level = 30
        access_level_description = "Developers"
        "#,
    )
    .unwrap();

    assert_eq!(rule.name, "release");
    assert_eq!(rule.push_access_levels[0].access_level, 40);
    assert_eq!(rule.push_access_levels[0].access_level_description, None);
    assert_eq!(
        rule.merge_access_levels[0].access_level_description.as_deref(),
        Some("Developers")
    );
    assert!(rule.code_owner_approval_required);
}
