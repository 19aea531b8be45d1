//! Slots, type-table indices and enumeration chains over class hierarchies

use crate::common::*;
use proptest::prelude::*;
use std::collections::HashSet;
use typeproj::{is_slotted, Chain, LayoutPlanner, SlotPlanner, StorageClass, TypeTable};

/// Storage shape of a generated dependency property
fn storage_info(shape: u8, visual: bool, enumerable: bool) -> DependencyPropertyInfo {
    let info = match shape {
        0 => DependencyPropertyInfo::simple(),
        1 => DependencyPropertyInfo::field("m_value"),
        2 => DependencyPropertyInfo::storage_group("EnsureGroup"),
        3 => DependencyPropertyInfo::default(),
        _ => DependencyPropertyInfo::default().implicit_content(),
    };
    let info = if visual { info.visual_tree() } else { info };
    if enumerable {
        info
    } else {
        info.not_enumerable()
    }
}

/// A linear hierarchy `C0 <- C1 <- ...`, one `Vec` of property shapes per class
fn hierarchy(classes: &[Vec<(u8, bool, bool)>]) -> (TypeGraph, Vec<TypeId>) {
    let mut lib = Library::new();
    let mut ids = Vec::new();
    let mut base = None;
    for (i, properties) in classes.iter().enumerate() {
        let mut definition = ClassDefinition::new().with_version_numbers([1]);
        if let Some(base) = base {
            definition = definition.with_base(base);
        }
        let class = lib.class_with(&format!("C{}", i), definition);
        for (j, (shape, visual, enumerable)) in properties.iter().enumerate() {
            lib.dp(
                class,
                &format!("P{}_{}", i, j),
                storage_info(*shape, *visual, *enumerable),
            );
        }
        ids.push(class);
        base = Some(class);
    }
    (lib.build(), ids)
}

fn property_shape() -> impl Strategy<Value = (u8, bool, bool)> {
    (0u8..5, any::<bool>(), any::<bool>())
}

proptest! {
    #[test]
    fn prop_derived_slots_extend_base_slots(
        classes in prop::collection::vec(prop::collection::vec(property_shape(), 0..6), 1..5)
    ) {
        let (graph, ids) = hierarchy(&classes);
        let slots = SlotPlanner::new(&graph);

        // Query the most derived class first so ancestors fill on demand
        let last = *ids.last().unwrap();
        slots.slotted_properties(last).unwrap();

        let mut previous: Vec<MemberId> = Vec::new();
        for &class in &ids {
            let list = slots.slotted_properties(class).unwrap();
            prop_assert!(list.starts_with(&previous));

            let own: Vec<MemberId> = graph
                .properties_of(class)
                .unwrap()
                .filter(|m| is_slotted(m))
                .map(|m| m.id())
                .collect();
            prop_assert_eq!(&list[previous.len()..], own.as_slice());

            for (position, member) in list.iter().enumerate() {
                let declaring = graph.member(*member).unwrap().declaring_type();
                let declaring_list = slots.slotted_properties(declaring).unwrap();
                prop_assert_eq!(declaring_list[position], *member);
            }
            for member in &own {
                prop_assert_eq!(
                    slots.slot_of(*member).unwrap(),
                    Some((previous.len() + own.iter().position(|m| m == member).unwrap()) as u32)
                );
            }
            previous = list.to_vec();
        }
    }

    #[test]
    fn prop_storage_classification_is_exclusive(
        classes in prop::collection::vec(prop::collection::vec(property_shape(), 0..6), 1..3)
    ) {
        let (graph, ids) = hierarchy(&classes);
        for class in ids {
            for member in graph.properties_of(class).unwrap() {
                let info = member.as_property().unwrap().dependency_info().unwrap();
                let storage = StorageClass::classify(info);
                let expected = if info.is_simple {
                    Some(StorageClass::SimpleInline)
                } else if info.field_name.is_some() {
                    Some(StorageClass::Field { field_name: "m_value".to_string() })
                } else if info.storage_group_method.is_some() {
                    Some(StorageClass::SparseGroup { ensure_method: "EnsureGroup".to_string() })
                } else if info.is_implicit_content {
                    None
                } else {
                    Some(StorageClass::Sparse)
                };
                prop_assert_eq!(&storage, &expected);
                prop_assert_eq!(StorageClass::of_member(member), storage.clone());

                let slotted = matches!(
                    storage,
                    Some(StorageClass::Field { .. })
                        | Some(StorageClass::SparseGroup { .. })
                        | Some(StorageClass::Sparse)
                );
                prop_assert_eq!(is_slotted(member), slotted);
            }
        }
    }

    #[test]
    fn prop_every_chain_terminates_within_declaration_chain(
        classes in prop::collection::vec(prop::collection::vec(property_shape(), 0..6), 1..5)
    ) {
        let (graph, ids) = hierarchy(&classes);
        let total = graph.member_count();
        for class in ids {
            let declaration: HashSet<MemberId> =
                Chain::Declaration.walk(&graph, class).unwrap().into_iter().collect();
            for chain in Chain::ALL {
                let walked = chain.walk(&graph, class).unwrap();
                prop_assert!(walked.len() < total);
                prop_assert!(walked.iter().all(|m| declaration.contains(m)));
                prop_assert!(!walked.contains(&MemberId::UNKNOWN_PROPERTY));
            }
        }
    }
}

#[test]
fn declaration_chain_runs_from_derived_into_base() {
    let mut lib = Library::new();
    let base = lib.class("UIElement", &[1]);
    let derived = lib.class_with(
        "Panel",
        ClassDefinition::new().with_base(base).with_version_numbers([1]),
    );
    let opacity = lib.dp(base, "Opacity", DependencyPropertyInfo::default());
    let hidden = lib.dp(base, "Hidden", DependencyPropertyInfo::default().not_enumerable());
    let children = lib.dp(
        derived,
        "Children",
        DependencyPropertyInfo::field("m_children").visual_tree().enter(),
    );
    let graph = lib.build();

    assert_eq!(
        Chain::Declaration.walk(&graph, derived).unwrap(),
        vec![children, opacity]
    );
    assert_eq!(Chain::Enter.walk(&graph, derived).unwrap(), vec![children]);
    assert_eq!(Chain::Object.walk(&graph, derived).unwrap(), vec![children]);
    assert_eq!(Chain::Render.walk(&graph, derived).unwrap(), vec![children]);

    // A non-enumerable property ends its own chain
    assert_eq!(
        Chain::Declaration.next(&graph, hidden).unwrap(),
        MemberId::UNKNOWN_PROPERTY
    );
}

#[test]
fn type_table_numbers_dependency_properties_from_one() {
    let mut lib = Library::new();
    let a = lib.class("A", &[1]);
    let b = lib.class("B", &[1]);
    let a1 = lib.dp(a, "First", DependencyPropertyInfo::default());
    let t = TypeReference::to(a);
    let plain = lib.member(a, MemberDefinition::property("Plain", 1, t));
    let b1 = lib.dp(b, "Second", DependencyPropertyInfo::simple());
    let graph = lib.build();

    let table = TypeTable::build(&graph).unwrap();
    assert_eq!(table.index_of(MemberId::UNKNOWN_PROPERTY), Some(0));
    assert_eq!(table.index_of(a1), Some(1));
    assert_eq!(table.index_of(b1), Some(2));
    assert_eq!(table.index_of(plain), None);
    assert_eq!(table.property_at(2), Some(b1));
}

#[test]
fn class_layout_matches_chain_walks() {
    let mut lib = Library::new();
    let base = lib.class("Base", &[1]);
    let derived = lib.class_with(
        "Derived",
        ClassDefinition::new().with_base(base).with_version_numbers([1]),
    );
    lib.dp(base, "Background", DependencyPropertyInfo::field("m_background"));
    lib.dp(derived, "Padding", DependencyPropertyInfo::storage_group("EnsureSpacing"));
    lib.dp(derived, "Content", DependencyPropertyInfo::field("m_content").visual_tree());
    let graph = lib.build();

    let planner = LayoutPlanner::new(&graph).unwrap();
    let layout = planner.class_layout(derived).unwrap();
    for chain in Chain::ALL {
        let walked = chain.walk(&graph, derived).unwrap();
        let first = walked.first().copied().unwrap_or(MemberId::UNKNOWN_PROPERTY);
        assert_eq!(layout.first(chain), first, "{}", chain);
    }

    // Base slots come first
    assert_eq!(layout.slotted.len(), 3);
    assert_eq!(
        member_name(&graph, layout.slotted[0]),
        "Background".to_string()
    );
    let content = &layout.properties[1];
    assert_eq!(content.name, "Content");
    assert_eq!(content.slot, Some(2));
    assert_eq!(content.type_table_index, 3);
}
