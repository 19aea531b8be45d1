//! Slotted-property lists
//!
//! A class's slotted list is its base's slotted list followed by its own
//! qualifying properties in declaration order. A property's slot is its
//! position in the list of its declaring class, so a slot never changes
//! between a base and its derived classes.
//!
//! Lists are memoized per class. Filling a class and all of its missing
//! ancestors happens under one lock acquisition.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;
use typeproj_core::{MemberDefinition, MemberId, Result, StorageClass, TypeGraph, TypeId};

/// Check if a property takes a slot
///
/// Dependency and attached properties whose storage is neither inline nor
/// absent.
pub fn is_slotted(member: &MemberDefinition) -> bool {
    matches!(
        StorageClass::of_member(member),
        Some(StorageClass::Field { .. })
            | Some(StorageClass::SparseGroup { .. })
            | Some(StorageClass::Sparse)
    )
}

/// Computes and caches slotted-property lists
pub struct SlotPlanner<'g> {
    graph: &'g TypeGraph,
    lists: Mutex<FxHashMap<TypeId, Arc<[MemberId]>>>,
}

impl<'g> SlotPlanner<'g> {
    /// Create a planner with an empty cache
    pub fn new(graph: &'g TypeGraph) -> Self {
        SlotPlanner {
            graph,
            lists: Mutex::new(FxHashMap::default()),
        }
    }

    /// Slotted list of `class`: base list, then own slotted properties
    pub fn slotted_properties(&self, class: TypeId) -> Result<Arc<[MemberId]>> {
        // Validate before locking
        self.graph.class(class)?;

        let mut lists = self.lists.lock();
        if let Some(list) = lists.get(&class) {
            return Ok(Arc::clone(list));
        }

        // Root-most uncached class first
        let mut pending = vec![class];
        let mut inherited: Arc<[MemberId]> = Arc::from(Vec::new());
        for ancestor in self.graph.ancestors(class) {
            if let Some(list) = lists.get(&ancestor) {
                inherited = Arc::clone(list);
                break;
            }
            pending.push(ancestor);
        }

        for &current in pending.iter().rev() {
            let mut list = inherited.to_vec();
            for property in self.graph.properties_of(current)? {
                if is_slotted(property) {
                    list.push(property.id());
                }
            }
            debug!(
                target: "typeproj::layout",
                class = self.graph.type_name(current),
                slots = list.len(),
                "Slotted list built"
            );
            let list: Arc<[MemberId]> = Arc::from(list);
            lists.insert(current, Arc::clone(&list));
            inherited = list;
        }

        Ok(inherited)
    }

    /// Slot of a property, `None` if it takes no slot
    pub fn slot_of(&self, member: MemberId) -> Result<Option<u32>> {
        let definition = self.graph.member(member)?;
        if member.is_unknown() || !is_slotted(definition) {
            return Ok(None);
        }
        let list = self.slotted_properties(definition.declaring_type())?;
        Ok(list
            .iter()
            .position(|&m| m == member)
            .map(|i| i as u32))
    }

    /// Number of classes with a cached list
    pub fn cached_classes(&self) -> usize {
        self.lists.lock().len()
    }
}
