//! Member definitions
//!
//! Every member belongs to exactly one declaring class and carries a version
//! number, a set of supported contracts and modifier flags. Variants:
//!
//! - Property (plain, dependency, attached), with independent getter and
//!   setter versions
//! - Event
//! - Method
//! - Constructor

use crate::contract::ContractReference;
use crate::ids::{MemberId, TypeId};
use crate::types::TypeReference;
use smallvec::SmallVec;

/// Modifier flags of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Belongs to the class, not an instance
    pub is_static: bool,
    /// Has no implementation on the declaring class
    pub is_abstract: bool,
    /// Overridable by derived classes
    pub is_virtual: bool,
    /// Visible to derived classes only
    pub is_protected: bool,
}

/// A named, typed parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub parameter_type: TypeReference,
}

impl Parameter {
    /// Create a parameter
    pub fn new(name: impl Into<String>, parameter_type: TypeReference) -> Self {
        Parameter {
            name: name.into(),
            parameter_type,
        }
    }
}

/// A member of a class
#[derive(Debug, Clone)]
pub struct MemberDefinition {
    pub(crate) id: MemberId,
    pub(crate) declaring_type: TypeId,
    name: String,
    version: u32,
    /// Modifier flags
    pub modifiers: Modifiers,
    supported_contracts: SmallVec<[ContractReference; 1]>,
    kind: MemberKind,
}

/// The closed set of member variants
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// A property of any flavor
    Property(PropertyDefinition),
    /// An event
    Event(EventDefinition),
    /// A method
    Method(MethodDefinition),
    /// A constructor
    Constructor(ConstructorDefinition),
}

/// Property payload
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    /// Value type of the property
    pub property_type: TypeReference,
    getter_version: Option<u32>,
    setter_version: Option<u32>,
    is_read_only: bool,
    /// Plain, dependency or attached
    pub kind: PropertyKind,
}

/// Flavor of a property
#[derive(Debug, Clone)]
pub enum PropertyKind {
    /// An ordinary accessor pair
    Plain,
    /// A dependency property declared on its owner
    Dependency(DependencyPropertyInfo),
    /// An attached property settable on instances of `target_type`
    Attached {
        /// Type the property attaches to
        target_type: TypeReference,
        /// Storage metadata
        info: DependencyPropertyInfo,
    },
}

/// Storage and enumeration metadata of a dependency property
///
/// The storage classification is derived from these fields (see
/// [`StorageClass::classify`](crate::StorageClass::classify)); it is never
/// set directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyPropertyInfo {
    /// Backing instance field, if field-backed
    pub field_name: Option<String>,
    /// Method that ensures the property's storage group exists
    pub storage_group_method: Option<String>,
    /// Stored inline as a simple value
    pub is_simple: bool,
    /// Implicit content property with no storage of its own
    pub is_implicit_content: bool,
    /// Value participates in the visual tree
    pub is_visual_tree: bool,
    /// Value must be notified when the owner enters the tree
    pub needs_enter: bool,
    /// Participates in property enumeration
    pub allow_enumeration: bool,
}

impl Default for DependencyPropertyInfo {
    fn default() -> Self {
        DependencyPropertyInfo {
            field_name: None,
            storage_group_method: None,
            is_simple: false,
            is_implicit_content: false,
            is_visual_tree: false,
            needs_enter: false,
            allow_enumeration: true,
        }
    }
}

impl DependencyPropertyInfo {
    /// Field-backed storage in `field_name`
    pub fn field(field_name: impl Into<String>) -> Self {
        DependencyPropertyInfo {
            field_name: Some(field_name.into()),
            ..Self::default()
        }
    }

    /// Sparse storage inside a group ensured by `method`
    pub fn storage_group(method: impl Into<String>) -> Self {
        DependencyPropertyInfo {
            storage_group_method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Simple inline storage
    pub fn simple() -> Self {
        DependencyPropertyInfo {
            is_simple: true,
            ..Self::default()
        }
    }

    /// Mark the value as part of the visual tree
    pub fn visual_tree(mut self) -> Self {
        self.is_visual_tree = true;
        self
    }

    /// Mark the value as needing tree-entry notification
    pub fn enter(mut self) -> Self {
        self.needs_enter = true;
        self
    }

    /// Exclude from enumeration
    pub fn not_enumerable(mut self) -> Self {
        self.allow_enumeration = false;
        self
    }

    /// Mark as the implicit content property
    pub fn implicit_content(mut self) -> Self {
        self.is_implicit_content = true;
        self
    }
}

/// Event payload
#[derive(Debug, Clone)]
pub struct EventDefinition {
    /// Handler delegate type
    pub handler_type: TypeReference,
}

/// Method payload
#[derive(Debug, Clone)]
pub struct MethodDefinition {
    /// Return type, `None` for void
    pub return_type: Option<TypeReference>,
    /// Parameters in order
    pub parameters: Vec<Parameter>,
}

/// Constructor payload
#[derive(Debug, Clone, Default)]
pub struct ConstructorDefinition {
    /// Parameters in order
    pub parameters: Vec<Parameter>,
}

impl MemberDefinition {
    fn with_kind(name: impl Into<String>, version: u32, kind: MemberKind) -> Self {
        MemberDefinition {
            id: MemberId::UNKNOWN_PROPERTY,
            declaring_type: TypeId::UNKNOWN,
            name: name.into(),
            version,
            modifiers: Modifiers::default(),
            supported_contracts: SmallVec::new(),
            kind,
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// A plain property
    pub fn property(name: impl Into<String>, version: u32, property_type: TypeReference) -> Self {
        Self::with_property_kind(name, version, property_type, PropertyKind::Plain)
    }

    /// A dependency property
    pub fn dependency_property(
        name: impl Into<String>,
        version: u32,
        property_type: TypeReference,
        info: DependencyPropertyInfo,
    ) -> Self {
        Self::with_property_kind(name, version, property_type, PropertyKind::Dependency(info))
    }

    /// An attached property
    ///
    /// Attached properties surface as static accessors, so they are static.
    pub fn attached_property(
        name: impl Into<String>,
        version: u32,
        property_type: TypeReference,
        target_type: TypeReference,
        info: DependencyPropertyInfo,
    ) -> Self {
        Self::with_property_kind(
            name,
            version,
            property_type,
            PropertyKind::Attached { target_type, info },
        )
        .with_static()
    }

    fn with_property_kind(
        name: impl Into<String>,
        version: u32,
        property_type: TypeReference,
        kind: PropertyKind,
    ) -> Self {
        Self::with_kind(
            name,
            version,
            MemberKind::Property(PropertyDefinition {
                property_type,
                getter_version: None,
                setter_version: None,
                is_read_only: false,
                kind,
            }),
        )
    }

    /// An event
    pub fn event(name: impl Into<String>, version: u32, handler_type: TypeReference) -> Self {
        Self::with_kind(name, version, MemberKind::Event(EventDefinition { handler_type }))
    }

    /// A method
    pub fn method(
        name: impl Into<String>,
        version: u32,
        return_type: Option<TypeReference>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self::with_kind(
            name,
            version,
            MemberKind::Method(MethodDefinition {
                return_type,
                parameters,
            }),
        )
    }

    /// A constructor
    pub fn constructor(version: u32, parameters: Vec<Parameter>) -> Self {
        Self::with_kind(
            ".ctor",
            version,
            MemberKind::Constructor(ConstructorDefinition { parameters }),
        )
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Mark static
    pub fn with_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark virtual (overridable)
    pub fn with_virtual(mut self) -> Self {
        self.modifiers.is_virtual = true;
        self
    }

    /// Mark protected
    pub fn with_protected(mut self) -> Self {
        self.modifiers.is_protected = true;
        self
    }

    /// Mark abstract
    pub fn with_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    /// Declare support for a contract version
    pub fn with_contract(mut self, contract: ContractReference) -> Self {
        self.supported_contracts.push(contract);
        self
    }

    /// Introduce the getter in a different version than the property
    ///
    /// Has no effect on non-property members.
    pub fn with_getter_version(mut self, version: u32) -> Self {
        if let MemberKind::Property(p) = &mut self.kind {
            p.getter_version = Some(version);
        }
        self
    }

    /// Introduce the setter in a different version than the property
    ///
    /// Has no effect on non-property members.
    pub fn with_setter_version(mut self, version: u32) -> Self {
        if let MemberKind::Property(p) = &mut self.kind {
            p.setter_version = Some(version);
            p.is_read_only = false;
        }
        self
    }

    /// Remove the setter
    ///
    /// Has no effect on non-property members.
    pub fn read_only(mut self) -> Self {
        if let MemberKind::Property(p) = &mut self.kind {
            p.is_read_only = true;
            p.setter_version = None;
        }
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Id assigned by the graph builder
    #[inline]
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Declaring class
    #[inline]
    pub fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    /// Member name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version that introduced the member
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Explicitly supported contract versions
    #[inline]
    pub fn supported_contracts(&self) -> &[ContractReference] {
        &self.supported_contracts
    }

    /// Variant payload
    #[inline]
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Property payload, if this member is a property
    pub fn as_property(&self) -> Option<&PropertyDefinition> {
        match &self.kind {
            MemberKind::Property(p) => Some(p),
            _ => None,
        }
    }

    /// Check if this member is a constructor
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor(_))
    }

    /// Every version this member references
    ///
    /// The member version, plus the getter and setter versions of a property.
    pub fn referenced_versions(&self) -> SmallVec<[u32; 3]> {
        let mut versions = SmallVec::new();
        versions.push(self.version);
        if let MemberKind::Property(p) = &self.kind {
            versions.push(p.getter_version(self.version));
            if let Some(setter) = p.setter_version(self.version) {
                versions.push(setter);
            }
        }
        versions
    }

    /// Check if this member is part of the projection at `version`
    ///
    /// Constructors, events and methods match on their own version. A
    /// property also matches when its getter or setter changed at `version`.
    pub fn belongs_to_version(&self, version: u32) -> bool {
        match &self.kind {
            MemberKind::Property(p) => {
                self.version == version
                    || p.getter_version(self.version) == version
                    || p.setter_version(self.version) == Some(version)
            }
            MemberKind::Event(_) | MemberKind::Method(_) | MemberKind::Constructor(_) => {
                self.version == version
            }
        }
    }
}

impl PropertyDefinition {
    /// Version of the getter, defaulting to the property version
    #[inline]
    pub fn getter_version(&self, property_version: u32) -> u32 {
        self.getter_version.unwrap_or(property_version)
    }

    /// Version of the setter, `None` when read-only
    #[inline]
    pub fn setter_version(&self, property_version: u32) -> Option<u32> {
        if self.is_read_only {
            None
        } else {
            Some(self.setter_version.unwrap_or(property_version))
        }
    }

    /// Check if the property has no setter
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    /// Dependency metadata of a dependency or attached property
    pub fn dependency_info(&self) -> Option<&DependencyPropertyInfo> {
        match &self.kind {
            PropertyKind::Plain => None,
            PropertyKind::Dependency(info) | PropertyKind::Attached { info, .. } => Some(info),
        }
    }

    /// Check if the property is attached
    pub fn is_attached(&self) -> bool {
        matches!(self.kind, PropertyKind::Attached { .. })
    }
}
