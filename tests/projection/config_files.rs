//! Generation driven by a `typeproj.toml` on disk

use crate::common::*;
use tempfile::TempDir;
use typeproj::{
    generate, ClassVersion, ErrorKind, InterfaceKind, LegacyCarveOut, ProjectionError,
    CONFIG_FILE_NAME, VELOCITY_VERSION_BASE,
};

fn two_release_library() -> TypeGraph {
    let mut lib = Library::new();
    let c = lib.class("Menu", &[1, 2, 3]);
    lib.member(c, MemberDefinition::method("Open", 1, None, vec![]));
    lib.member(c, MemberDefinition::method("Close", 2, None, vec![]));
    lib.member(c, MemberDefinition::method("Toggle", 3, None, vec![]));
    lib.build()
}

/// `Demo.Menu` with version 1 and one feature version at `number`
fn preview_library(feature: &str, number: u32) -> TypeGraph {
    let mut lib = Library::new();
    let c = lib.class_with(
        "Menu",
        ClassDefinition::new()
            .with_version_numbers([1])
            .with_versions([ClassVersion::feature(number, feature)]),
    );
    lib.member(c, MemberDefinition::method("Open", 1, None, vec![]));
    lib.member(c, MemberDefinition::method("Peek", number, None, vec![]));
    lib.build()
}

#[test]
fn config_written_to_disk_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let config = ProjectorConfig {
        velocity_features: vec!["Feature_Menus".to_string()],
        releases: vec![release(1, 1), release(3, 2)],
        legacy_interface_carve_outs: vec![LegacyCarveOut {
            type_name: "Demo.Menu".to_string(),
            after_version: 9,
        }],
    };
    config.write_to_file(&path).unwrap();

    let loaded = ProjectorConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn releases_from_file_drive_contract_collisions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
[[releases]]
first_version = 1
contract = "Demo.FoundationContract"
contract_version = 1

[[releases]]
first_version = 3
contract = "Demo.FoundationContract"
contract_version = 2
"#,
    )
    .unwrap();

    let graph = two_release_library();
    let config = ProjectorConfig::from_file(&path).unwrap();
    let plan = generate(&graph, &config).unwrap();
    let menu = plan.class("Demo.Menu").unwrap();

    // 1 and 2 share contract version 1; 3 is alone in version 2
    assert!(menu.version(1).unwrap().is_explicit(InterfaceKind::Primary));
    assert!(menu.version(2).unwrap().is_explicit(InterfaceKind::Primary));
    assert!(!menu.version(3).unwrap().is_explicit(InterfaceKind::Primary));
    assert_eq!(
        menu.version(3).unwrap().contract.as_ref().unwrap().version(),
        2
    );
}

#[test]
fn default_file_generates_without_releases() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ProjectorConfig::write_default_if_missing(&path).unwrap();

    let graph = two_release_library();
    let config = ProjectorConfig::from_file(&path).unwrap();
    let plan = generate(&graph, &config).unwrap();
    let menu = plan.class("Demo.Menu").unwrap();
    assert!(menu.versions.iter().all(|v| v.contract.is_none()));
}

#[test]
fn release_naming_unknown_contract_aborts_generation() {
    let graph = two_release_library();
    let config = ProjectorConfig::from_toml_str(
        r#"
[[releases]]
first_version = 1
contract = "Demo.MissingContract"
contract_version = 1
"#,
    )
    .unwrap();

    let err = generate(&graph, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputCorruption);
    assert!(err.to_string().contains("Demo.MissingContract"));
}

#[test]
fn malformed_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[[releases]]\nfirst_version = \"one\"\n").unwrap();

    let err = ProjectorConfig::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}

#[test]
fn feature_numbers_must_match_configured_features() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "velocity_features = [\"Feature_A\"]\n").unwrap();
    let config = ProjectorConfig::from_file(&path).unwrap();

    // Feature_A is pinned to the first velocity slot
    let graph = preview_library("Feature_A", VELOCITY_VERSION_BASE + 7);
    let err = generate(&graph, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputCorruption);
    assert_eq!(
        err,
        ProjectionError::VelocityFeatureMismatch {
            type_name: "Demo.Menu".to_string(),
            feature: "Feature_A".to_string(),
            declared: VELOCITY_VERSION_BASE + 7,
            registered: VELOCITY_VERSION_BASE,
        }
    );
}

#[test]
fn configured_feature_order_fixes_numbers() {
    let config = ProjectorConfig::from_toml_str(
        "velocity_features = [\"Feature_B\", \"Feature_A\"]\n",
    )
    .unwrap();

    let graph = preview_library("Feature_A", VELOCITY_VERSION_BASE + 1);
    let plan = generate(&graph, &config).unwrap();
    let preview = plan
        .class("Demo.Menu")
        .unwrap()
        .version(VELOCITY_VERSION_BASE + 1)
        .unwrap();
    assert_eq!(preview.suffix, "Feature_A");
    assert!(preview.is_explicit(InterfaceKind::Primary));

    // Without the config, Feature_A would take the first slot
    let err = generate(&graph, &ProjectorConfig::default()).unwrap_err();
    assert!(matches!(err, ProjectionError::VelocityFeatureMismatch { .. }));
}
