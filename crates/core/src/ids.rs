//! Arena identifiers for the type graph
//!
//! Every entity in a [`TypeGraph`](crate::TypeGraph) is addressed by a small
//! copyable id rather than a live reference. Ids are only meaningful for the
//! graph that issued them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    /// The synthetic "unknown type" root of every inheritance chain
    pub const UNKNOWN: TypeId = TypeId(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        TypeId(index as u32)
    }

    /// Position of this type in the graph arena
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the unknown-type sentinel
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Identifier of a member definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(u32);

impl MemberId {
    /// The synthetic "unknown property", terminator of every enumeration chain
    pub const UNKNOWN_PROPERTY: MemberId = MemberId(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        MemberId(index as u32)
    }

    /// Position of this member in the graph arena
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the unknown-property sentinel
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}

/// Identifier of a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId(u32);

impl NamespaceId {
    /// The synthetic namespace that owns the sentinel types
    pub const GLOBAL: NamespaceId = NamespaceId(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        NamespaceId(index as u32)
    }

    /// Position of this namespace in the graph arena
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
