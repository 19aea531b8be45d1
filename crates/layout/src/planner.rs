//! Per-class property layout
//!
//! Combines the storage classification, slot planner, type table and the
//! four enumeration chains into the layout records emitters consume. Layout
//! is computed on the base (unprojected) class definitions, so every
//! projection of a class shares it.

use crate::chains::Chain;
use crate::slots::SlotPlanner;
use crate::table::TypeTable;
use serde::Serialize;
use tracing::debug;
use typeproj_core::{MemberId, ProjectionError, Result, StorageClass, TypeGraph, TypeId};

/// Layout of one dependency or attached property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyLayout {
    /// The property
    pub member: MemberId,
    /// Property name
    pub name: String,
    /// Storage strategy; `None` for implicit content
    pub storage: Option<StorageClass>,
    /// Slot in the declaring class's slotted list
    pub slot: Option<u32>,
    /// Global type-table index
    pub type_table_index: u32,
    /// Successor in declaration order
    pub next_property: MemberId,
    /// Successor in enter order
    pub next_enter_property: MemberId,
    /// Successor in object order
    pub next_object_property: MemberId,
    /// Successor in render order
    pub next_render_property: MemberId,
}

/// Layout of one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLayout {
    /// The class
    pub class: TypeId,
    /// Slotted properties, inherited ones first
    pub slotted: Vec<MemberId>,
    /// Head of the declaration chain
    pub first_property: MemberId,
    /// Head of the enter chain
    pub first_enter_property: MemberId,
    /// Head of the object chain
    pub first_object_property: MemberId,
    /// Head of the render chain
    pub first_render_property: MemberId,
    /// The class's own dependency and attached properties
    pub properties: Vec<PropertyLayout>,
}

impl ClassLayout {
    /// Head of a chain
    pub fn first(&self, chain: Chain) -> MemberId {
        match chain {
            Chain::Declaration => self.first_property,
            Chain::Enter => self.first_enter_property,
            Chain::Object => self.first_object_property,
            Chain::Render => self.first_render_property,
        }
    }
}

impl PropertyLayout {
    /// Successor on a chain
    pub fn next(&self, chain: Chain) -> MemberId {
        match chain {
            Chain::Declaration => self.next_property,
            Chain::Enter => self.next_enter_property,
            Chain::Object => self.next_object_property,
            Chain::Render => self.next_render_property,
        }
    }
}

/// Computes property and class layouts over a graph
pub struct LayoutPlanner<'g> {
    graph: &'g TypeGraph,
    slots: SlotPlanner<'g>,
    table: TypeTable,
}

impl<'g> LayoutPlanner<'g> {
    /// Create a planner; numbers the type table up front
    pub fn new(graph: &'g TypeGraph) -> Result<Self> {
        Ok(LayoutPlanner {
            graph,
            slots: SlotPlanner::new(graph),
            table: TypeTable::build(graph)?,
        })
    }

    /// The slot planner
    pub fn slots(&self) -> &SlotPlanner<'g> {
        &self.slots
    }

    /// The type table
    pub fn type_table(&self) -> &TypeTable {
        &self.table
    }

    /// Layout of one dependency or attached property
    pub fn property_layout(&self, member: MemberId) -> Result<PropertyLayout> {
        let definition = self.graph.member(member)?;
        let info = definition
            .as_property()
            .and_then(|p| p.dependency_info())
            .ok_or(ProjectionError::InvalidMemberId { id: member })?;
        let type_table_index = self
            .table
            .index_of(member)
            .ok_or(ProjectionError::InvalidMemberId { id: member })?;

        Ok(PropertyLayout {
            member,
            name: definition.name().to_string(),
            storage: StorageClass::classify(info),
            slot: self.slots.slot_of(member)?,
            type_table_index,
            next_property: Chain::Declaration.next(self.graph, member)?,
            next_enter_property: Chain::Enter.next(self.graph, member)?,
            next_object_property: Chain::Object.next(self.graph, member)?,
            next_render_property: Chain::Render.next(self.graph, member)?,
        })
    }

    /// Layout of a class and its own dependency and attached properties
    pub fn class_layout(&self, class: TypeId) -> Result<ClassLayout> {
        let mut properties = Vec::new();
        for property in self.graph.properties_of(class)? {
            let is_dependency = property
                .as_property()
                .map_or(false, |p| p.dependency_info().is_some());
            if is_dependency {
                properties.push(self.property_layout(property.id())?);
            }
        }

        let layout = ClassLayout {
            class,
            slotted: self.slots.slotted_properties(class)?.to_vec(),
            first_property: Chain::Declaration.first(self.graph, class)?,
            first_enter_property: Chain::Enter.first(self.graph, class)?,
            first_object_property: Chain::Object.first(self.graph, class)?,
            first_render_property: Chain::Render.first(self.graph, class)?,
            properties,
        };
        debug!(
            target: "typeproj::layout",
            class = self.graph.type_name(class),
            properties = layout.properties.len(),
            slots = layout.slotted.len(),
            "Class layout planned"
        );
        Ok(layout)
    }
}
