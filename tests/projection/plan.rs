//! Generation plan contents and its JSON form

use crate::common::*;
use serde_json::{json, Value};
use typeproj::{generate, Chain, InterfaceKind, Parameter, VELOCITY_VERSION_BASE};

fn gallery() -> TypeGraph {
    let mut lib = Library::new();
    let mut registry = typeproj::VelocityRegistry::new();
    let feature = registry.feature_version("Feature_Zoom").unwrap();

    let c = lib.class_with(
        "Gallery",
        ClassDefinition::new()
            .with_version_numbers([1, 2])
            .with_versions([feature]),
    );
    let t = TypeReference::to(c);
    lib.member(c, MemberDefinition::method("Refresh", 1, None, vec![]));
    lib.member(
        c,
        MemberDefinition::method("Create", 2, Some(t), vec![]).with_static(),
    );
    lib.member(
        c,
        MemberDefinition::constructor(1, vec![Parameter::new("source", t)]),
    );
    lib.member(
        c,
        MemberDefinition::method("ZoomTo", VELOCITY_VERSION_BASE, None, vec![]),
    );
    lib.dp(c, "Items", DependencyPropertyInfo::field("m_items").visual_tree());
    lib.build()
}

fn member_id(graph: &TypeGraph, name: &str) -> MemberId {
    let class = graph.type_by_name("Demo.Gallery").unwrap();
    graph
        .members_of(class)
        .unwrap()
        .find(|m| m.name() == name)
        .unwrap()
        .id()
}

#[test]
fn plan_lists_generated_interfaces_per_version() {
    let graph = gallery();
    let config = config_with_releases(vec![release(1, 1), release(2, 2)]);
    let plan = generate(&graph, &config).unwrap();

    assert_eq!(plan.classes.len(), 1);
    assert_eq!(plan.version_count(), 3);
    let gallery = plan.class("Demo.Gallery").unwrap();

    let v1 = gallery.version(1).unwrap();
    assert_eq!(v1.suffix, "");
    assert_eq!(v1.interface(InterfaceKind::Primary).unwrap().name, "IGallery");
    assert_eq!(v1.interface(InterfaceKind::Factory).unwrap().name, "IGalleryFactory");
    // The dependency property identifier lands on the statics interface
    assert_eq!(v1.interface(InterfaceKind::Static).unwrap().name, "IGalleryStatics");
    assert!(v1.interface(InterfaceKind::Protected).is_none());
    assert_eq!(v1.contract.as_ref().unwrap().version(), 1);

    let v2 = gallery.version(2).unwrap();
    let statics = v2.interface(InterfaceKind::Static).unwrap();
    assert_eq!(statics.name, "IGalleryStatics2");
    // Version 1 already had statics, so no gap forces the name
    assert!(!statics.explicit);
    assert!(v2.interface(InterfaceKind::Primary).is_none());
    assert_eq!(v2.contract.as_ref().unwrap().version(), 2);

    let preview = gallery.version(VELOCITY_VERSION_BASE).unwrap();
    assert_eq!(preview.velocity_version, Some(VELOCITY_VERSION_BASE));
    assert!(preview.contract.is_none());
    let primary = preview.interface(InterfaceKind::Primary).unwrap();
    assert_eq!(primary.name, "IGalleryFeature_Zoom");
    assert!(primary.explicit);

    // Every released member carries its contract; the preview member has none
    let refresh = member_id(&graph, "Refresh");
    assert_eq!(v1.contracts_of(refresh).len(), 1);
    assert_eq!(v1.contracts_of(refresh)[0].version(), 1);
    let create = member_id(&graph, "Create");
    assert_eq!(v2.contracts_of(create)[0].version(), 2);
    assert_eq!(v2.member_contracts.len(), 1);
    assert!(preview.member_contracts.is_empty());

    assert_eq!(gallery.layout.properties.len(), 1);
    assert_eq!(gallery.layout.first(Chain::Render), gallery.layout.properties[0].member);
}

#[test]
fn plan_serializes_to_json() {
    let graph = gallery();
    let config = config_with_releases(vec![release(1, 1), release(2, 2)]);
    let plan = generate(&graph, &config).unwrap();

    let value = serde_json::to_value(&plan).unwrap();
    let class = &value["classes"][0];
    assert_eq!(class["name"], json!("Demo.Gallery"));

    let versions = class["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[1]["version"], json!(2));
    assert_eq!(
        versions[1]["contract"]["contract_name"],
        json!("Demo.FoundationContract")
    );

    let statics = versions[1]["interfaces"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["kind"] == json!("static"))
        .unwrap();
    assert_eq!(statics["name"], json!("IGalleryStatics2"));
    assert_eq!(statics["explicit"], json!(false));

    let preview = versions[2]["interfaces"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["kind"] == json!("primary"))
        .unwrap();
    assert_eq!(preview["name"], json!("IGalleryFeature_Zoom"));
    assert_eq!(preview["explicit"], json!(true));

    let contracts = versions[0]["member_contracts"].as_array().unwrap();
    assert!(contracts.iter().any(|m| m["name"] == json!("Refresh")));

    let property = &class["layout"]["properties"][0];
    assert_eq!(property["name"], json!("Items"));
    assert_eq!(property["storage"]["strategy"], json!("field"));
    assert_eq!(property["storage"]["field_name"], json!("m_items"));
    assert_eq!(property["slot"], json!(0));
    assert_eq!(property["type_table_index"], json!(1));
    assert!(matches!(versions[2]["velocity_version"], Value::Number(_)));
}
