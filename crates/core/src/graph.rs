//! The validated type graph
//!
//! A [`TypeGraph`] is an arena of namespaces, types and members addressed by
//! ids. It is produced by [`GraphBuilder::build`](crate::GraphBuilder::build),
//! which validates every structural invariant up front, and is immutable
//! afterwards. Downstream passes (contract resolution, projection, slotting)
//! are pure functions over a shared `&TypeGraph`.
//!
//! ## Sentinels
//!
//! - [`TypeId::UNKNOWN`]: a synthetic class that is the implicit base of every
//!   root class. Recursion over the inheritance chain terminates here.
//! - [`MemberId::UNKNOWN_PROPERTY`]: a synthetic, non-enumerable property used
//!   as the terminator of every enumeration chain.

use crate::contract::{ClassVersion, ContractDefinition, ContractReference};
use crate::error::{ProjectionError, Result};
use crate::ids::{MemberId, NamespaceId, TypeId};
use crate::members::{DependencyPropertyInfo, MemberDefinition, PropertyDefinition};
use crate::types::{
    ClassDefinition, NamespaceDefinition, TypeDefinition, TypeKind, TypeReference,
};
use rustc_hash::FxHashMap;

/// Name of the synthetic unknown type
pub const UNKNOWN_TYPE_NAME: &str = "UnknownType";

/// Name of the synthetic unknown property
pub const UNKNOWN_PROPERTY_NAME: &str = "UnknownProperty";

/// An immutable, validated type graph
#[derive(Debug, Clone)]
pub struct TypeGraph {
    pub(crate) namespaces: Vec<NamespaceDefinition>,
    pub(crate) types: Vec<TypeDefinition>,
    pub(crate) members: Vec<MemberDefinition>,
    pub(crate) by_name: FxHashMap<String, TypeId>,
}

impl TypeGraph {
    /// A graph holding only the sentinel namespace, type and property
    pub(crate) fn with_sentinels() -> Self {
        let mut global = NamespaceDefinition::new("");
        global.types.push(TypeId::UNKNOWN);

        let unknown_type = TypeDefinition {
            id: TypeId::UNKNOWN,
            name: UNKNOWN_TYPE_NAME.to_string(),
            full_name: UNKNOWN_TYPE_NAME.to_string(),
            namespace: NamespaceId::GLOBAL,
            kind: TypeKind::Class(ClassDefinition::new().with_versions([ClassVersion::initial()])),
        };

        let mut unknown_property = MemberDefinition::dependency_property(
            UNKNOWN_PROPERTY_NAME,
            crate::limits::INITIAL_VERSION,
            TypeReference::to(TypeId::UNKNOWN),
            DependencyPropertyInfo::default().not_enumerable(),
        );
        unknown_property.id = MemberId::UNKNOWN_PROPERTY;
        unknown_property.declaring_type = TypeId::UNKNOWN;

        let mut by_name = FxHashMap::default();
        by_name.insert(UNKNOWN_TYPE_NAME.to_string(), TypeId::UNKNOWN);

        TypeGraph {
            namespaces: vec![global],
            types: vec![unknown_type],
            members: vec![unknown_property],
            by_name,
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Look up a type by id
    pub fn type_def(&self, id: TypeId) -> Result<&TypeDefinition> {
        self.types
            .get(id.index())
            .ok_or(ProjectionError::InvalidTypeId { id })
    }

    /// Fully-qualified name of a type, for diagnostics
    pub fn type_name(&self, id: TypeId) -> &str {
        self.types
            .get(id.index())
            .map(TypeDefinition::full_name)
            .unwrap_or("<invalid type>")
    }

    /// Look up a type by fully-qualified name
    pub fn type_by_name(&self, name: &str) -> Result<TypeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ProjectionError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Look up a class by id
    pub fn class(&self, id: TypeId) -> Result<&ClassDefinition> {
        let def = self.type_def(id)?;
        def.as_class().ok_or_else(|| ProjectionError::WrongTypeKind {
            type_name: def.full_name().to_string(),
            expected: "class",
        })
    }

    /// Look up a contract by id
    pub fn contract(&self, id: TypeId) -> Result<&ContractDefinition> {
        let def = self.type_def(id)?;
        def.as_contract()
            .ok_or_else(|| ProjectionError::WrongTypeKind {
                type_name: def.full_name().to_string(),
                expected: "contract",
            })
    }

    /// Pin a version of a contract in this graph
    pub fn contract_ref(&self, contract: TypeId, version: u32) -> Result<ContractReference> {
        let definition = self.contract(contract)?;
        ContractReference::new(contract, self.type_name(contract), definition, version)
    }

    /// Look up a declared version of a class
    ///
    /// # Errors
    ///
    /// Returns `UnknownVersion` naming the class and version if the class
    /// does not declare it.
    pub fn class_version(&self, class: TypeId, version: u32) -> Result<&ClassVersion> {
        self.class(class)?
            .version(version)
            .ok_or_else(|| ProjectionError::UnknownVersion {
                type_name: self.type_name(class).to_string(),
                version,
            })
    }

    /// All user classes in declaration order, excluding the sentinel
    pub fn classes(&self) -> impl Iterator<Item = (TypeId, &ClassDefinition)> + '_ {
        self.types
            .iter()
            .skip(1)
            .filter_map(|def| def.as_class().map(|class| (def.id, class)))
    }

    /// All types in declaration order, excluding the sentinel
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> + '_ {
        self.types.iter().skip(1)
    }

    /// Number of types, including the sentinel
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Base classes of `class`, nearest first, excluding the sentinel
    ///
    /// Terminates because the builder rejects inheritance cycles.
    pub fn ancestors(&self, class: TypeId) -> Ancestors<'_> {
        let next = self
            .class(class)
            .map(ClassDefinition::base)
            .unwrap_or(TypeId::UNKNOWN);
        Ancestors { graph: self, next }
    }

    /// Check if a use-site type is a reference type
    ///
    /// Arrays, boxed nullables, delegates, contracts and non-value classes
    /// are reference types; enums and value-type classes are not.
    pub fn is_reference_type(&self, reference: &TypeReference) -> bool {
        if reference.modifiers.is_array || reference.modifiers.is_nullable {
            return true;
        }
        match self.type_def(reference.target).map(TypeDefinition::kind) {
            Ok(TypeKind::Class(class)) => !class.flags.is_value_type,
            Ok(TypeKind::Delegate(_)) | Ok(TypeKind::Contract(_)) => true,
            Ok(TypeKind::Enum(_)) | Ok(TypeKind::Attribute(_)) | Err(_) => false,
        }
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    /// Look up a namespace
    pub fn namespace(&self, id: NamespaceId) -> Option<&NamespaceDefinition> {
        self.namespaces.get(id.index())
    }

    /// Declaring namespace of a type
    pub fn namespace_of(&self, id: TypeId) -> Result<&NamespaceDefinition> {
        let ns = self.type_def(id)?.namespace();
        self.namespace(ns)
            .ok_or_else(|| ProjectionError::UnknownType {
                name: format!("namespace #{}", ns.index()),
            })
    }

    /// All namespaces, including the synthetic global one
    pub fn namespaces(&self) -> &[NamespaceDefinition] {
        &self.namespaces
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Look up a member by id
    pub fn member(&self, id: MemberId) -> Result<&MemberDefinition> {
        self.members
            .get(id.index())
            .ok_or(ProjectionError::InvalidMemberId { id })
    }

    /// Look up a property by id
    pub fn property(&self, id: MemberId) -> Result<&PropertyDefinition> {
        self.member(id)?
            .as_property()
            .ok_or(ProjectionError::InvalidMemberId { id })
    }

    /// Members of a class in declaration order
    pub fn members_of(
        &self,
        class: TypeId,
    ) -> Result<impl Iterator<Item = &MemberDefinition> + '_> {
        let ids = self.class(class)?.members();
        Ok(ids.iter().filter_map(move |id| self.members.get(id.index())))
    }

    /// Properties of a class in declaration order
    pub fn properties_of(
        &self,
        class: TypeId,
    ) -> Result<impl Iterator<Item = &MemberDefinition> + '_> {
        Ok(self
            .members_of(class)?
            .filter(|m| m.as_property().is_some()))
    }

    /// Number of members, including the sentinel property
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Iterator over the base classes of a class
pub struct Ancestors<'g> {
    graph: &'g TypeGraph,
    next: TypeId,
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        if self.next.is_unknown() {
            return None;
        }
        let current = self.next;
        self.next = self
            .graph
            .class(current)
            .map(ClassDefinition::base)
            .unwrap_or(TypeId::UNKNOWN);
        Some(current)
    }
}
