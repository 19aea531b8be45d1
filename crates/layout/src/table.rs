//! Global property type table
//!
//! Every dependency and attached property gets a type-table index. Index 0
//! is the unknown property; real properties start at 1 and follow the
//! graph's class declaration order, then each class's property order.

use rustc_hash::FxHashMap;
use typeproj_core::{MemberId, Result, TypeGraph};

/// Type-table indices of all dependency and attached properties
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    indices: FxHashMap<MemberId, u32>,
    order: Vec<MemberId>,
}

impl TypeTable {
    /// Number the properties of `graph`
    pub fn build(graph: &TypeGraph) -> Result<Self> {
        let mut table = TypeTable::default();
        table.order.push(MemberId::UNKNOWN_PROPERTY);
        table.indices.insert(MemberId::UNKNOWN_PROPERTY, 0);

        for (class, _) in graph.classes() {
            for property in graph.properties_of(class)? {
                let is_dependency = property
                    .as_property()
                    .map_or(false, |p| p.dependency_info().is_some());
                if is_dependency {
                    table.indices.insert(property.id(), table.order.len() as u32);
                    table.order.push(property.id());
                }
            }
        }
        Ok(table)
    }

    /// Index of a property, `None` if it has none
    pub fn index_of(&self, member: MemberId) -> Option<u32> {
        self.indices.get(&member).copied()
    }

    /// Property at an index
    pub fn property_at(&self, index: u32) -> Option<MemberId> {
        self.order.get(index as usize).copied()
    }

    /// Number of entries, including the unknown property
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the table has no entries at all
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
