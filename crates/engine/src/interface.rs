//! Generated interface kinds
//!
//! Every class version can surface up to five binary interfaces. Which of
//! them exist at a version depends on the members in that version's
//! projection; whether their names must be written out is decided by the
//! inclusion resolver.

use crate::projection::Projection;
use serde::{Deserialize, Serialize};
use std::fmt;
use typeproj_core::{MemberDefinition, MemberKind, Result, TypeGraph};

/// One of the interfaces generated for a class version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// Public instance members
    Primary,
    /// Static members and dependency-property identifiers
    Static,
    /// Protected instance members
    Protected,
    /// Overridable members
    Virtual,
    /// Activation factory
    Factory,
}

impl InterfaceKind {
    /// Every kind, in emission order
    pub const ALL: [InterfaceKind; 5] = [
        InterfaceKind::Primary,
        InterfaceKind::Static,
        InterfaceKind::Protected,
        InterfaceKind::Virtual,
        InterfaceKind::Factory,
    ];

    /// Infix between the class name and the version suffix
    pub fn infix(&self) -> &'static str {
        match self {
            InterfaceKind::Primary => "",
            InterfaceKind::Static => "Statics",
            InterfaceKind::Protected => "Protected",
            InterfaceKind::Virtual => "Overrides",
            InterfaceKind::Factory => "Factory",
        }
    }

    /// Generated interface name, e.g. `IButtonStatics2`
    pub fn interface_name(&self, class_name: &str, suffix: &str) -> String {
        format!("I{}{}{}", class_name, self.infix(), suffix)
    }

    /// Check if `member` belongs on this interface in `projection`
    pub fn admits(&self, projection: &Projection, member: &MemberDefinition) -> bool {
        let m = member.modifiers;
        match self {
            InterfaceKind::Primary => {
                !member.is_constructor() && !m.is_static && !m.is_virtual && !m.is_protected
            }
            InterfaceKind::Static => {
                m.is_static || (introduces_identifier(member) && member.version() == projection.version())
            }
            InterfaceKind::Protected => {
                !member.is_constructor() && m.is_protected && !m.is_virtual && !m.is_static
            }
            InterfaceKind::Virtual => m.is_virtual,
            InterfaceKind::Factory => match member.kind() {
                MemberKind::Constructor(ctor) => {
                    !ctor.parameters.is_empty() || projection.flags().is_abstract
                }
                _ => false,
            },
        }
    }

    /// Check if `projection` has any member of this kind
    pub fn has_members(&self, graph: &TypeGraph, projection: &Projection) -> Result<bool> {
        for id in projection.members().iter() {
            if self.admits(projection, graph.member(id)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceKind::Primary => "primary",
            InterfaceKind::Static => "static",
            InterfaceKind::Protected => "protected",
            InterfaceKind::Virtual => "virtual",
            InterfaceKind::Factory => "factory",
        };
        f.write_str(name)
    }
}

/// Dependency and attached properties expose a static identifier
fn introduces_identifier(member: &MemberDefinition) -> bool {
    member
        .as_property()
        .map_or(false, |p| p.dependency_info().is_some())
}
