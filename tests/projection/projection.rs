//! Projection completeness and velocity behavior

use crate::common::*;
use proptest::prelude::*;
use typeproj::{ClassVersion, ProjectionEngine, VelocityRegistry, VELOCITY_VERSION_BASE};

/// A member as (version, getter, setter, kind) where kind 0..4 picks
/// property, event, method or constructor
type MemberSpec = (u32, Option<u32>, Option<u32>, u8);

fn member_spec() -> impl Strategy<Value = MemberSpec> {
    (
        1u32..=5,
        prop::option::of(1u32..=5),
        prop::option::of(1u32..=5),
        0u8..4,
    )
}

fn build_member(i: usize, spec: &MemberSpec, t: TypeReference) -> MemberDefinition {
    let (version, getter, setter, kind) = *spec;
    match kind {
        0 => {
            let mut p = MemberDefinition::property(format!("P{}", i), version, t);
            if let Some(g) = getter {
                p = p.with_getter_version(g);
            }
            match setter {
                Some(s) => p.with_setter_version(s),
                None => p.read_only(),
            }
        }
        1 => MemberDefinition::event(format!("E{}", i), version, t),
        2 => MemberDefinition::method(format!("M{}", i), version, None, vec![]),
        _ => MemberDefinition::constructor(version, vec![]),
    }
}

proptest! {
    #[test]
    fn prop_projection_is_complete_and_exact(specs in prop::collection::vec(member_spec(), 0..20)) {
        let mut lib = Library::new();
        let c = lib.class("Shape", &[1, 2, 3, 4, 5]);
        let t = TypeReference::to(c);
        for (i, spec) in specs.iter().enumerate() {
            lib.member(c, build_member(i, spec, t));
        }
        let graph = lib.build();
        let engine = ProjectionEngine::new(&graph);

        for version in 1..=5 {
            let projection = engine.project(c, version).unwrap();
            let mut seen = 0;
            for member in graph.members_of(c).unwrap() {
                let expected = member.belongs_to_version(version);
                prop_assert_eq!(projection.members().contains(member.id()), expected);
                if expected {
                    seen += 1;
                }
            }
            // Exactly once each
            prop_assert_eq!(projection.members().len(), seen);
        }
    }
}

#[test]
fn getter_and_setter_versions_place_property_in_each() {
    let mut lib = Library::new();
    let c = lib.class("TextBox", &[1, 2, 3]);
    let t = TypeReference::to(c);
    let text = lib.member(
        c,
        MemberDefinition::property("Text", 1, t)
            .with_getter_version(2)
            .with_setter_version(3),
    );
    let graph = lib.build();
    let engine = ProjectionEngine::new(&graph);
    for version in 1..=3 {
        assert!(engine.project(c, version).unwrap().members().contains(text));
    }
}

#[test]
fn feature_versions_use_registry_numbers() {
    let mut registry = VelocityRegistry::new();
    let feature = registry.feature_version("Feature_Flyouts").unwrap();
    assert_eq!(feature.number(), VELOCITY_VERSION_BASE);

    let mut lib = Library::new();
    let c = lib.class_with(
        "Flyout",
        ClassDefinition::new()
            .with_version_numbers([1])
            .with_versions([feature]),
    );
    let show = lib.member(
        c,
        MemberDefinition::method("ShowAt", VELOCITY_VERSION_BASE, None, vec![]),
    );
    let graph = lib.build();
    let engine = ProjectionEngine::new(&graph);

    let released = engine.project(c, 1).unwrap();
    assert_eq!(released.velocity_version(), None);
    let preview = engine.project(c, VELOCITY_VERSION_BASE).unwrap();
    assert_eq!(preview.velocity_version(), Some(VELOCITY_VERSION_BASE));
    assert_eq!(preview.suffix(), "Feature_Flyouts");
    assert!(preview.members().contains(show));
}

#[test]
fn velocity_scoped_class_carries_its_version_everywhere() {
    let mut registry = VelocityRegistry::new();
    registry.allocate("Feature_Other").unwrap();
    let scoped = registry.allocate("Feature_Whole").unwrap();

    let mut lib = Library::new();
    let c = lib.class_with(
        "Preview",
        ClassDefinition::new()
            .with_velocity_version(scoped)
            .with_versions([ClassVersion::initial(), ClassVersion::numbered(2)]),
    );
    let graph = lib.build();
    let engine = ProjectionEngine::new(&graph);
    for projection in engine.project_all(c).unwrap() {
        assert_eq!(projection.velocity_version(), Some(VELOCITY_VERSION_BASE + 1));
    }
}

#[test]
fn projection_copies_class_scalars() {
    let mut lib = Library::new();
    let base = lib.class("Base", &[1]);
    let c = lib.class_with(
        "Derived",
        ClassDefinition::new()
            .with_base(base)
            .abstract_class()
            .with_version_numbers([1, 2]),
    );
    let graph = lib.build();
    let engine = ProjectionEngine::new(&graph);
    let v2 = engine.project(c, 2).unwrap();
    assert_eq!(v2.base(), base);
    assert!(v2.flags().is_abstract);
    assert_eq!(v2.source(), c);
    assert!(v2.members().is_empty());
}
