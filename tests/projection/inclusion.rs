//! Interface-name inclusion across whole classes

use crate::common::*;
use typeproj::{
    generate, ContractAnnotations, ErrorKind, InclusionReason, InclusionResolver, InterfaceKind,
    LegacyCarveOut, ProjectionEngine, ProjectionError,
};

#[test]
fn numeric_version_requires_earlier_projections() {
    let mut lib = Library::new();
    let c = lib.class("Pivot", &[1, 2, 3]);
    lib.member(c, MemberDefinition::method("Select", 3, None, vec![]));
    let graph = lib.build();

    let engine = ProjectionEngine::new(&graph);
    let annotations = ContractAnnotations::default();
    let resolver = InclusionResolver::new(&engine, &annotations, &[]);

    let err = resolver
        .should_include(c, 3, InterfaceKind::Primary)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderingViolation);
    assert_eq!(
        err,
        ProjectionError::OrderingViolation {
            type_name: "Demo.Pivot".to_string(),
            version: 3,
            missing: 1,
        }
    );

    // Projecting in order clears it
    engine.project_all(c).unwrap();
    assert!(resolver.should_include(c, 3, InterfaceKind::Primary).unwrap());
}

#[test]
fn ordering_check_applies_without_members() {
    let mut lib = Library::new();
    let c = lib.class("Empty", &[1, 2]);
    let graph = lib.build();

    let engine = ProjectionEngine::new(&graph);
    let annotations = ContractAnnotations::default();
    let resolver = InclusionResolver::new(&engine, &annotations, &[]);
    let err = resolver
        .should_include(c, 2, InterfaceKind::Static)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderingViolation);
}

#[test]
fn explain_reports_gap_with_previous_version() {
    let mut lib = Library::new();
    let c = lib.class("Expander", &[1, 2, 3]);
    lib.member(c, MemberDefinition::method("Expand", 1, None, vec![]));
    lib.member(c, MemberDefinition::method("Collapse", 3, None, vec![]));
    let graph = lib.build();

    let engine = ProjectionEngine::new(&graph);
    engine.project_all(c).unwrap();
    let annotations = ContractAnnotations::default();
    let resolver = InclusionResolver::new(&engine, &annotations, &[]);

    assert_eq!(
        resolver.explain(c, 3, InterfaceKind::Primary).unwrap(),
        Some(InclusionReason::Gap { previous: 2 })
    );
    assert_eq!(resolver.explain(c, 2, InterfaceKind::Primary).unwrap(), None);
    assert_eq!(resolver.explain(c, 1, InterfaceKind::Primary).unwrap(), None);
}

#[test]
fn contiguous_versions_in_distinct_contracts_stay_implicit() {
    let mut lib = Library::new();
    let c = lib.class("Ribbon", &[1, 2, 3]);
    for (name, version) in [("A", 1), ("B", 2), ("C", 3)] {
        lib.member(c, MemberDefinition::method(name, version, None, vec![]));
    }
    let graph = lib.build();

    let config = config_with_releases(vec![release(1, 1), release(2, 2), release(3, 3)]);
    let plan = generate(&graph, &config).unwrap();
    let ribbon = plan.class("Demo.Ribbon").unwrap();
    for version in 1..=3 {
        let v = ribbon.version(version).unwrap();
        assert!(!v.is_explicit(InterfaceKind::Primary), "version {}", version);
        // Still generated, just not named explicitly
        assert!(v.interface(InterfaceKind::Primary).is_some());
    }
}

#[test]
fn abstract_class_factory_forced_at_initial_version() {
    let mut lib = Library::new();
    let c = lib.class_with(
        "Control",
        ClassDefinition::new()
            .abstract_class()
            .with_version_numbers([1, 2]),
    );
    lib.member(c, MemberDefinition::constructor(1, vec![]));
    let graph = lib.build();

    let engine = ProjectionEngine::new(&graph);
    engine.project_all(c).unwrap();
    let annotations = ContractAnnotations::default();
    let resolver = InclusionResolver::new(&engine, &annotations, &[]);
    assert_eq!(
        resolver.explain(c, 1, InterfaceKind::Factory).unwrap(),
        Some(InclusionReason::AbstractFactory)
    );
    assert!(!resolver.should_include(c, 1, InterfaceKind::Primary).unwrap());
}

#[test]
fn default_config_carries_historical_carve_out() {
    init_tracing();
    let mut builder = GraphBuilder::new();
    let ns = builder.namespace("Windows.UI.Xaml");
    let element = builder
        .add_class(
            ns,
            "UIElement",
            ClassDefinition::new().with_version_numbers(1..=6),
        )
        .unwrap();
    for version in 1..=6 {
        builder
            .add_member(
                element,
                MemberDefinition::method(format!("Step{}", version), version, None, vec![]),
            )
            .unwrap();
    }
    let graph = builder.build().unwrap();

    let plan = generate(&graph, &ProjectorConfig::default()).unwrap();
    let class = plan.class("Windows.UI.Xaml.UIElement").unwrap();
    for version in 1..=4 {
        assert!(!class.version(version).unwrap().is_explicit(InterfaceKind::Primary));
    }
    for version in 5..=6 {
        assert!(class.version(version).unwrap().is_explicit(InterfaceKind::Primary));
    }

    // Without the carve-out nothing is forced
    let plan = generate(&graph, &config_with_releases(Vec::new())).unwrap();
    let class = plan.class("Windows.UI.Xaml.UIElement").unwrap();
    assert!(class
        .versions
        .iter()
        .all(|v| !v.is_explicit(InterfaceKind::Primary)));
}

#[test]
fn configured_carve_out_applies_to_named_type() {
    let mut lib = Library::new();
    let c = lib.class("Legacy", &[1, 2, 3]);
    for version in 1..=3 {
        lib.member(
            c,
            MemberDefinition::method(format!("M{}", version), version, None, vec![]),
        );
    }
    let graph = lib.build();

    let mut config = config_with_releases(Vec::new());
    config.legacy_interface_carve_outs.push(LegacyCarveOut {
        type_name: "Demo.Legacy".to_string(),
        after_version: 2,
    });
    let plan = generate(&graph, &config).unwrap();
    let legacy = plan.class("Demo.Legacy").unwrap();
    assert!(!legacy.version(2).unwrap().is_explicit(InterfaceKind::Primary));
    assert!(legacy.version(3).unwrap().is_explicit(InterfaceKind::Primary));
}
