//! Two-pass type graph construction
//!
//! Pass one declares entities and references through [`GraphBuilder`].
//! Pass two, [`GraphBuilder::build`], validates the whole graph and freezes
//! it into a [`TypeGraph`]. Every invariant the projection passes rely on is
//! checked here, so they never have to re-check it lazily:
//!
//! - fully-qualified type names are unique
//! - bases are classes and the inheritance graph is acyclic
//! - every class declares at least one version, each number at most once
//! - feature-named versions are numbered inside the velocity range, every
//!   other version below it
//! - every member version, getter version and setter version is declared by
//!   the member's class
//! - every contract reference pins a version its contract registered
//! - every type reference targets a type in the graph
//!
//! ## Usage
//!
//! ```
//! use typeproj_core::{ClassDefinition, GraphBuilder, MemberDefinition};
//!
//! let mut builder = GraphBuilder::new();
//! let ns = builder.namespace("Demo.Controls");
//! let button = builder
//!     .add_class(ns, "Button", ClassDefinition::new().with_version_numbers([1, 2]))
//!     .unwrap();
//! builder
//!     .add_member(button, MemberDefinition::method("Click", 2, None, vec![]))
//!     .unwrap();
//! let graph = builder.build().unwrap();
//! assert_eq!(graph.classes().count(), 1);
//! ```

use crate::contract::{ClassVersion, ContractDefinition, ContractReference, VersionSuffix};
use crate::error::{ProjectionError, Result};
use crate::graph::TypeGraph;
use crate::ids::{MemberId, NamespaceId, TypeId};
use crate::limits::is_velocity_version;
use crate::members::{MemberDefinition, MemberKind, PropertyKind};
use crate::types::{
    AttributeDefinition, ClassDefinition, DelegateDefinition, EnumDefinition, TypeDefinition,
    TypeKind, TypeReference,
};
use tracing::debug;

/// Mutable builder for a [`TypeGraph`]
#[derive(Debug)]
pub struct GraphBuilder {
    graph: TypeGraph,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a builder holding only the sentinels
    pub fn new() -> Self {
        GraphBuilder {
            graph: TypeGraph::with_sentinels(),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declare (or reuse) a namespace
    pub fn namespace(&mut self, name: &str) -> NamespaceId {
        if let Some(index) = self.graph.namespaces.iter().position(|ns| ns.name == name) {
            return NamespaceId::from_index(index);
        }
        self.graph
            .namespaces
            .push(crate::types::NamespaceDefinition::new(name));
        NamespaceId::from_index(self.graph.namespaces.len() - 1)
    }

    fn add_type(&mut self, namespace: NamespaceId, name: &str, kind: TypeKind) -> Result<TypeId> {
        let ns = self
            .graph
            .namespaces
            .get(namespace.index())
            .ok_or_else(|| ProjectionError::UnknownType {
                name: format!("namespace #{}", namespace.index()),
            })?;
        let full_name = ns.qualify(name);
        if self.graph.by_name.contains_key(&full_name) {
            return Err(ProjectionError::DuplicateType { name: full_name });
        }

        let id = TypeId::from_index(self.graph.types.len());
        self.graph.types.push(TypeDefinition {
            id,
            name: name.to_string(),
            full_name: full_name.clone(),
            namespace,
            kind,
        });
        self.graph.by_name.insert(full_name, id);
        self.graph.namespaces[namespace.index()].types.push(id);
        Ok(id)
    }

    /// Declare a class
    ///
    /// Members are added afterwards with [`add_member`](Self::add_member).
    pub fn add_class(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        mut class: ClassDefinition,
    ) -> Result<TypeId> {
        class.members.clear();
        self.add_type(namespace, name, TypeKind::Class(class))
    }

    /// Declare an enumeration
    pub fn add_enum(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        definition: EnumDefinition,
    ) -> Result<TypeId> {
        self.add_type(namespace, name, TypeKind::Enum(definition))
    }

    /// Declare a delegate
    pub fn add_delegate(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        definition: DelegateDefinition,
    ) -> Result<TypeId> {
        self.add_type(namespace, name, TypeKind::Delegate(definition))
    }

    /// Declare an attribute
    pub fn add_attribute(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        definition: AttributeDefinition,
    ) -> Result<TypeId> {
        self.add_type(namespace, name, TypeKind::Attribute(definition))
    }

    /// Declare a contract with its registered versions
    pub fn add_contract(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        versions: impl IntoIterator<Item = u32>,
    ) -> Result<TypeId> {
        self.add_type(
            namespace,
            name,
            TypeKind::Contract(ContractDefinition::new(versions)),
        )
    }

    /// Pin a version of a declared contract
    pub fn contract_ref(&self, contract: TypeId, version: u32) -> Result<ContractReference> {
        self.graph.contract_ref(contract, version)
    }

    /// Look up a declared type by fully-qualified name
    pub fn type_id(&self, name: &str) -> Result<TypeId> {
        self.graph.type_by_name(name)
    }

    fn class_mut(&mut self, class: TypeId) -> Result<&mut ClassDefinition> {
        let def = self
            .graph
            .types
            .get_mut(class.index())
            .filter(|def| !def.id.is_unknown())
            .ok_or(ProjectionError::InvalidTypeId { id: class })?;
        let type_name = def.full_name.clone();
        match &mut def.kind {
            TypeKind::Class(c) => Ok(c),
            _ => Err(ProjectionError::WrongTypeKind {
                type_name,
                expected: "class",
            }),
        }
    }

    /// Set the base class of a declared class
    pub fn set_base(&mut self, class: TypeId, base: TypeId) -> Result<()> {
        self.class_mut(class)?.base = Some(base);
        Ok(())
    }

    /// Declare a version of a class
    pub fn add_version(&mut self, class: TypeId, version: ClassVersion) -> Result<()> {
        let type_name = self.graph.type_name(class).to_string();
        let def = self.class_mut(class)?;
        if def.versions.iter().any(|v| v.number() == version.number()) {
            return Err(ProjectionError::DuplicateVersion {
                type_name,
                version: version.number(),
            });
        }
        let at = def.versions.partition_point(|v| v.number() < version.number());
        def.versions.insert(at, version);
        Ok(())
    }

    /// Add a member to a class, in declaration order
    pub fn add_member(&mut self, class: TypeId, mut member: MemberDefinition) -> Result<MemberId> {
        let id = MemberId::from_index(self.graph.members.len());
        self.class_mut(class)?.members.push(id);
        member.id = id;
        member.declaring_type = class;
        self.graph.members.push(member);
        Ok(id)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate the graph and freeze it
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found, naming the offending
    /// type (and version or member where relevant).
    pub fn build(mut self) -> Result<TypeGraph> {
        self.normalize_versions()?;

        let graph = self.graph;
        for def in graph.types() {
            match def.kind() {
                TypeKind::Class(class) => {
                    validate_base(&graph, def, class)?;
                    validate_velocity(def, class)?;
                    validate_class_contracts(&graph, class)?;
                    validate_type_refs(&graph, class.generic_arguments.iter())?;
                    validate_type_refs(&graph, class.interfaces.iter())?;
                    for member in graph.members_of(def.id())? {
                        validate_member(&graph, def, class, member)?;
                    }
                }
                TypeKind::Delegate(delegate) => {
                    validate_type_refs(
                        &graph,
                        delegate
                            .return_type
                            .iter()
                            .chain(delegate.parameters.iter().map(|p| &p.parameter_type)),
                    )?;
                }
                TypeKind::Enum(_) | TypeKind::Attribute(_) | TypeKind::Contract(_) => {}
            }
        }
        validate_acyclic(&graph)?;

        debug!(
            target: "typeproj::graph",
            types = graph.type_count() - 1,
            members = graph.member_count() - 1,
            namespaces = graph.namespaces().len() - 1,
            "Type graph built"
        );
        Ok(graph)
    }

    fn normalize_versions(&mut self) -> Result<()> {
        for def in self.graph.types.iter_mut().skip(1) {
            let type_name = &def.full_name;
            if let TypeKind::Class(class) = &mut def.kind {
                if class.versions.is_empty() {
                    return Err(ProjectionError::MissingVersions {
                        type_name: type_name.clone(),
                    });
                }
                class.versions.sort();
                if let Some(pair) = class
                    .versions
                    .windows(2)
                    .find(|pair| pair[0].number() == pair[1].number())
                {
                    return Err(ProjectionError::DuplicateVersion {
                        type_name: type_name.clone(),
                        version: pair[0].number(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn validate_base(graph: &TypeGraph, def: &TypeDefinition, class: &ClassDefinition) -> Result<()> {
    let base = class.base();
    if base == def.id() {
        return Err(ProjectionError::InheritanceCycle {
            type_name: def.full_name().to_string(),
        });
    }
    graph.class(base).map(|_| ())
}

fn validate_velocity(def: &TypeDefinition, class: &ClassDefinition) -> Result<()> {
    let invalid = |version| ProjectionError::InvalidVelocityVersion {
        type_name: def.full_name().to_string(),
        version,
    };
    if let Some(version) = class.velocity_version {
        if !is_velocity_version(version) {
            return Err(invalid(version));
        }
    }
    // Feature names live in the velocity range; released numbers stay below it
    for version in class.versions() {
        let symbolic = matches!(version.parsed_suffix(), VersionSuffix::Symbolic(_));
        if symbolic != version.is_velocity() {
            return Err(invalid(version.number()));
        }
    }
    Ok(())
}

fn validate_contract(graph: &TypeGraph, reference: &ContractReference) -> Result<()> {
    let contract = graph.contract(reference.contract())?;
    if contract.declares(reference.version()) {
        Ok(())
    } else {
        Err(ProjectionError::UnregisteredContractVersion {
            contract: reference.contract_name().to_string(),
            version: reference.version(),
        })
    }
}

fn validate_class_contracts(graph: &TypeGraph, class: &ClassDefinition) -> Result<()> {
    for version in class.versions() {
        if let Some(reference) = version.contract() {
            validate_contract(graph, reference)?;
        }
    }
    Ok(())
}

fn validate_type_refs<'a>(
    graph: &TypeGraph,
    refs: impl Iterator<Item = &'a TypeReference>,
) -> Result<()> {
    for reference in refs {
        graph.type_def(reference.target)?;
    }
    Ok(())
}

fn validate_member(
    graph: &TypeGraph,
    def: &TypeDefinition,
    class: &ClassDefinition,
    member: &MemberDefinition,
) -> Result<()> {
    for version in member.referenced_versions() {
        if !class.has_version(version) {
            return Err(ProjectionError::MemberVersionOutOfRange {
                type_name: def.full_name().to_string(),
                member: member.name().to_string(),
                version,
            });
        }
    }
    for reference in member.supported_contracts() {
        validate_contract(graph, reference)?;
    }
    match member.kind() {
        MemberKind::Property(p) => {
            validate_type_refs(graph, std::iter::once(&p.property_type))?;
            if let PropertyKind::Attached { target_type, .. } = &p.kind {
                validate_type_refs(graph, std::iter::once(target_type))?;
            }
        }
        MemberKind::Event(e) => validate_type_refs(graph, std::iter::once(&e.handler_type))?,
        MemberKind::Method(m) => validate_type_refs(
            graph,
            m.return_type
                .iter()
                .chain(m.parameters.iter().map(|p| &p.parameter_type)),
        )?,
        MemberKind::Constructor(c) => {
            validate_type_refs(graph, c.parameters.iter().map(|p| &p.parameter_type))?
        }
    }
    Ok(())
}

fn validate_acyclic(graph: &TypeGraph) -> Result<()> {
    let limit = graph.type_count();
    for (id, _) in graph.classes() {
        let mut current = id;
        let mut steps = 0usize;
        while !current.is_unknown() {
            steps += 1;
            if steps > limit {
                return Err(ProjectionError::InheritanceCycle {
                    type_name: graph.type_name(id).to_string(),
                });
            }
            current = graph.class(current)?.base();
        }
    }
    Ok(())
}
