//! Type definitions
//!
//! This module defines the entities of the type graph:
//! - NamespaceDefinition: Declaring scope of a set of types
//! - TypeDefinition: Named entity in a namespace, tagged by [`TypeKind`]
//! - ClassDefinition: Member-bearing type with a base class and a version list
//! - EnumDefinition, DelegateDefinition, AttributeDefinition
//! - TypeReference: Use-site reference to a type with modifiers

use crate::contract::{ClassVersion, ContractDefinition};
use crate::ids::{MemberId, NamespaceId, TypeId};
use crate::members::Parameter;
use serde::{Deserialize, Serialize};

// ============================================================================
// Namespaces
// ============================================================================

/// A namespace and the types it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDefinition {
    /// Dotted namespace name (empty for the synthetic global namespace)
    pub name: String,
    /// Declared types, in declaration order
    pub types: Vec<TypeId>,
}

impl NamespaceDefinition {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        NamespaceDefinition {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Qualify a type name with this namespace
    pub fn qualify(&self, type_name: &str) -> String {
        if self.name.is_empty() {
            type_name.to_string()
        } else {
            format!("{}.{}", self.name, type_name)
        }
    }
}

// ============================================================================
// Type definitions
// ============================================================================

/// A named entity belonging to exactly one namespace
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) namespace: NamespaceId,
    pub(crate) kind: TypeKind,
}

impl TypeDefinition {
    /// Id of this type
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Short name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace-qualified name
    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Declaring namespace
    #[inline]
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Variant payload
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Class payload, if this type is a class
    pub fn as_class(&self) -> Option<&ClassDefinition> {
        match &self.kind {
            TypeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Contract payload, if this type is a contract
    pub fn as_contract(&self) -> Option<&ContractDefinition> {
        match &self.kind {
            TypeKind::Contract(contract) => Some(contract),
            _ => None,
        }
    }
}

/// The closed set of type variants
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A class (or value type)
    Class(ClassDefinition),
    /// An enumeration
    Enum(EnumDefinition),
    /// A delegate signature
    Delegate(DelegateDefinition),
    /// A custom attribute
    Attribute(AttributeDefinition),
    /// A capability contract
    Contract(ContractDefinition),
}

impl TypeKind {
    /// Lower-case kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Class(_) => "class",
            TypeKind::Enum(_) => "enum",
            TypeKind::Delegate(_) => "delegate",
            TypeKind::Attribute(_) => "attribute",
            TypeKind::Contract(_) => "contract",
        }
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Scalar class flags copied verbatim into every projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFlags {
    /// Cannot be instantiated directly; factory is composable
    pub is_abstract: bool,
    /// Cannot be derived from
    pub is_sealed: bool,
    /// Has only static members
    pub is_static: bool,
    /// Value type (primitive or struct), not a reference type
    pub is_value_type: bool,
}

/// A member-bearing type
///
/// ## Invariants
///
/// - `base` is another class or [`TypeId::UNKNOWN`]; the chain is acyclic
/// - `versions` is sorted ascending with unique numbers
/// - every member's version (and getter/setter version) is in `versions`
#[derive(Debug, Clone, Default)]
pub struct ClassDefinition {
    pub(crate) base: Option<TypeId>,
    /// Scalar flags
    pub flags: ClassFlags,
    /// Generic type arguments
    pub generic_arguments: Vec<TypeReference>,
    /// Implemented interfaces
    pub interfaces: Vec<TypeReference>,
    /// Version of the velocity feature this whole class belongs to, if any
    pub velocity_version: Option<u32>,
    pub(crate) versions: Vec<ClassVersion>,
    pub(crate) members: Vec<MemberId>,
}

impl ClassDefinition {
    /// Create an empty class definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base class
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Set the flags
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the class abstract
    pub fn abstract_class(mut self) -> Self {
        self.flags.is_abstract = true;
        self
    }

    /// Mark the class as a value type
    pub fn value_type(mut self) -> Self {
        self.flags.is_value_type = true;
        self
    }

    /// Scope the class to a velocity feature version
    pub fn with_velocity_version(mut self, version: u32) -> Self {
        self.velocity_version = Some(version);
        self
    }

    /// Declare versions
    pub fn with_versions(mut self, versions: impl IntoIterator<Item = ClassVersion>) -> Self {
        self.versions.extend(versions);
        self
    }

    /// Declare released versions by number
    pub fn with_version_numbers(self, numbers: impl IntoIterator<Item = u32>) -> Self {
        self.with_versions(numbers.into_iter().map(ClassVersion::numbered))
    }

    /// Base class (the unknown type for roots)
    #[inline]
    pub fn base(&self) -> TypeId {
        self.base.unwrap_or(TypeId::UNKNOWN)
    }

    /// Declared versions, ascending
    #[inline]
    pub fn versions(&self) -> &[ClassVersion] {
        &self.versions
    }

    /// Look up a declared version
    pub fn version(&self, number: u32) -> Option<&ClassVersion> {
        self.versions
            .binary_search_by_key(&number, ClassVersion::number)
            .ok()
            .map(|i| &self.versions[i])
    }

    /// Check if `number` is a declared version
    pub fn has_version(&self, number: u32) -> bool {
        self.version(number).is_some()
    }

    /// Versions strictly earlier than `number`, ascending
    pub fn versions_before(&self, number: u32) -> &[ClassVersion] {
        let end = self.versions.partition_point(|v| v.number() < number);
        &self.versions[..end]
    }

    /// Member ids in declaration order
    #[inline]
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }
}

// ============================================================================
// Other type variants
// ============================================================================

/// One named enumeration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name
    pub name: String,
    /// Numeric value
    pub value: i64,
    /// Version that introduced the value
    pub version: u32,
}

/// An enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDefinition {
    /// Declared values in order
    pub values: Vec<EnumValue>,
    /// Values combine as bit flags
    pub is_flags: bool,
}

/// A delegate signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegateDefinition {
    /// Return type, `None` for void
    pub return_type: Option<TypeReference>,
    /// Parameters in order
    pub parameters: Vec<Parameter>,
}

/// A custom attribute type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// May be applied more than once to one target
    pub allow_multiple: bool,
}

// ============================================================================
// Type references
// ============================================================================

/// Use-site modifiers of a type reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeModifiers {
    /// `T[]`
    pub is_array: bool,
    /// Boxed nullable value (`IReference<T>`)
    pub is_nullable: bool,
    /// May be omitted by the caller
    pub is_optional: bool,
    /// Out-parameter
    pub is_out: bool,
    /// Return position
    pub is_return: bool,
}

/// A use-site reference to a type
///
/// Pure value: two references are equal iff they target the same type with
/// the same modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// Referenced type
    pub target: TypeId,
    /// Use-site modifiers
    pub modifiers: TypeModifiers,
}

impl TypeReference {
    /// Plain reference to `target`
    pub fn to(target: TypeId) -> Self {
        TypeReference {
            target,
            modifiers: TypeModifiers::default(),
        }
    }

    /// Array of the target
    pub fn array(mut self) -> Self {
        self.modifiers.is_array = true;
        self
    }

    /// Nullable target
    pub fn nullable(mut self) -> Self {
        self.modifiers.is_nullable = true;
        self
    }

    /// Optional parameter
    pub fn optional(mut self) -> Self {
        self.modifiers.is_optional = true;
        self
    }

    /// Out-parameter
    pub fn out(mut self) -> Self {
        self.modifiers.is_out = true;
        self
    }

    /// Return position
    pub fn returned(mut self) -> Self {
        self.modifiers.is_return = true;
        self
    }
}
