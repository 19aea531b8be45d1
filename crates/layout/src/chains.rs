//! Enumeration-order chains
//!
//! Dependency and attached properties are threaded onto up to four singly
//! linked lists. Each list visits a class's qualifying properties in
//! declaration order, then continues at the base class's first qualifying
//! property, and ends at [`MemberId::UNKNOWN_PROPERTY`].
//!
//! | Chain | Qualifies when |
//! |-------|----------------|
//! | declaration | enumerable |
//! | enter | reference-typed and needs tree entry |
//! | object | field-backed and reference-typed |
//! | render | field-backed and part of the visual tree |
//!
//! Every chain requires the property to be enumerable. Asking for the
//! successor of a non-enumerable property yields the sentinel, not an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use typeproj_core::{MemberDefinition, MemberId, Result, StorageClass, TypeGraph, TypeId};

/// One of the four enumeration orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    /// Every enumerable property
    Declaration,
    /// Properties notified when the owner enters the tree
    Enter,
    /// Field-backed properties holding objects
    Object,
    /// Field-backed visual-tree properties
    Render,
}

impl Chain {
    /// All chains
    pub const ALL: [Chain; 4] = [Chain::Declaration, Chain::Enter, Chain::Object, Chain::Render];

    /// Check if `member` is on this chain
    pub fn admits(&self, graph: &TypeGraph, member: &MemberDefinition) -> bool {
        let Some(property) = member.as_property() else {
            return false;
        };
        let Some(info) = property.dependency_info() else {
            return false;
        };
        if !info.allow_enumeration {
            return false;
        }
        let field_backed = StorageClass::classify(info).map_or(false, |s| s.is_field_backed());
        match self {
            Chain::Declaration => true,
            Chain::Enter => info.needs_enter && graph.is_reference_type(&property.property_type),
            Chain::Object => field_backed && graph.is_reference_type(&property.property_type),
            Chain::Render => field_backed && info.is_visual_tree,
        }
    }

    /// First property of `class` or its nearest ancestor on this chain
    pub fn first(&self, graph: &TypeGraph, class: TypeId) -> Result<MemberId> {
        for owner in std::iter::once(class).chain(graph.ancestors(class)) {
            if let Some(found) = graph.properties_of(owner)?.find(|m| self.admits(graph, m)) {
                return Ok(found.id());
            }
        }
        Ok(MemberId::UNKNOWN_PROPERTY)
    }

    /// Successor of `member` on this chain
    ///
    /// Returns [`MemberId::UNKNOWN_PROPERTY`] for the sentinel itself and for
    /// properties excluded from enumeration.
    pub fn next(&self, graph: &TypeGraph, member: MemberId) -> Result<MemberId> {
        if member.is_unknown() {
            return Ok(MemberId::UNKNOWN_PROPERTY);
        }
        let definition = graph.member(member)?;
        let enumerable = definition
            .as_property()
            .and_then(|p| p.dependency_info())
            .map_or(false, |info| info.allow_enumeration);
        if !enumerable {
            return Ok(MemberId::UNKNOWN_PROPERTY);
        }

        let owner = definition.declaring_type();
        let following = graph
            .properties_of(owner)?
            .skip_while(|m| m.id() != member)
            .skip(1)
            .find(|m| self.admits(graph, m));
        match following {
            Some(found) => Ok(found.id()),
            None => self.first(graph, graph.class(owner)?.base()),
        }
    }

    /// Walk the chain from `class`'s first property to the sentinel
    pub fn walk(&self, graph: &TypeGraph, class: TypeId) -> Result<Vec<MemberId>> {
        let mut out = Vec::new();
        let mut current = self.first(graph, class)?;
        while !current.is_unknown() {
            out.push(current);
            current = self.next(graph, current)?;
        }
        Ok(out)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Declaration => "declaration",
            Chain::Enter => "enter",
            Chain::Object => "object",
            Chain::Render => "render",
        };
        f.write_str(name)
    }
}
