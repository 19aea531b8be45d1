//! Version projections
//!
//! A [`Projection`] is "what this class's public interface looked like at
//! version V": the class's scalar attributes copied verbatim, plus only the
//! members that changed at V.
//!
//! ## Filtering Rule
//!
//! - Constructors, events and methods belong iff their version equals V
//! - Properties belong iff their version, getter version or setter version
//!   equals V
//!
//! ## Velocity Version
//!
//! A velocity-scoped class propagates its own velocity version into every
//! projection. Otherwise the projection's velocity version is V itself iff V
//! lies in the velocity range.

use serde::Serialize;
use typeproj_core::{
    is_velocity_version, ClassFlags, MemberId, MemberKind, Result, TypeGraph, TypeId,
    TypeReference,
};

/// Members of a projection, split by kind, each in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedMembers {
    /// Properties of every flavor
    pub properties: Vec<MemberId>,
    /// Events
    pub events: Vec<MemberId>,
    /// Methods
    pub methods: Vec<MemberId>,
    /// Constructors
    pub constructors: Vec<MemberId>,
}

impl ProjectedMembers {
    /// All members, grouped by kind
    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.properties
            .iter()
            .chain(&self.events)
            .chain(&self.methods)
            .chain(&self.constructors)
            .copied()
    }

    /// Total number of members
    pub fn len(&self) -> usize {
        self.properties.len() + self.events.len() + self.methods.len() + self.constructors.len()
    }

    /// Check if the projection has no members
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `member` is in the projection
    pub fn contains(&self, member: MemberId) -> bool {
        self.iter().any(|m| m == member)
    }
}

/// A version-filtered snapshot of a class
///
/// Immutable after construction. The projection navigates back to its source
/// class by id; it does not own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    source: TypeId,
    version: u32,
    suffix: String,
    base: TypeId,
    flags: ClassFlags,
    generic_arguments: Vec<TypeReference>,
    interfaces: Vec<TypeReference>,
    velocity_version: Option<u32>,
    members: ProjectedMembers,
}

impl Projection {
    /// Build the projection of `class` at `version`
    ///
    /// # Errors
    ///
    /// Returns `UnknownVersion` naming the class and version if the class
    /// does not declare `version`.
    pub fn build(graph: &TypeGraph, class: TypeId, version: u32) -> Result<Self> {
        let definition = graph.class(class)?;
        let class_version = graph.class_version(class, version)?;

        let velocity_version = match definition.velocity_version {
            Some(v) => Some(v),
            None if is_velocity_version(version) => Some(version),
            None => None,
        };

        let mut members = ProjectedMembers::default();
        for member in graph.members_of(class)? {
            if !member.belongs_to_version(version) {
                continue;
            }
            let bucket = match member.kind() {
                MemberKind::Property(_) => &mut members.properties,
                MemberKind::Event(_) => &mut members.events,
                MemberKind::Method(_) => &mut members.methods,
                MemberKind::Constructor(_) => &mut members.constructors,
            };
            bucket.push(member.id());
        }

        Ok(Projection {
            source: class,
            version,
            suffix: class_version.suffix().to_string(),
            base: definition.base(),
            flags: definition.flags,
            generic_arguments: definition.generic_arguments.clone(),
            interfaces: definition.interfaces.clone(),
            velocity_version,
            members,
        })
    }

    /// Class this projection was taken from
    #[inline]
    pub fn source(&self) -> TypeId {
        self.source
    }

    /// Projected version number
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Interface-name suffix of the projected version
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Base class of the source class
    #[inline]
    pub fn base(&self) -> TypeId {
        self.base
    }

    /// Scalar flags of the source class
    #[inline]
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    /// Generic arguments of the source class
    #[inline]
    pub fn generic_arguments(&self) -> &[TypeReference] {
        &self.generic_arguments
    }

    /// Implemented interfaces of the source class
    #[inline]
    pub fn interfaces(&self) -> &[TypeReference] {
        &self.interfaces
    }

    /// Velocity version, if the projection is velocity-scoped
    #[inline]
    pub fn velocity_version(&self) -> Option<u32> {
        self.velocity_version
    }

    /// Projected members
    #[inline]
    pub fn members(&self) -> &ProjectedMembers {
        &self.members
    }
}
