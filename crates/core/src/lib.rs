//! Core types for typeproj
//!
//! This crate defines the type graph every projection pass works over:
//! - Ids: TypeId, MemberId, NamespaceId (arena addressing)
//! - Types: TypeDefinition tagged by TypeKind (class, enum, delegate, attribute, contract)
//! - Members: MemberDefinition tagged by MemberKind (property, event, method, constructor)
//! - Contracts: ContractDefinition, ContractReference, ClassVersion
//! - StorageClass: derived storage strategy of a dependency property
//! - GraphBuilder / TypeGraph: two-pass construction and the validated graph
//! - Error: ProjectionError hierarchy shared by all crates
//! - Limits: the fixed velocity version range

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod contract;
pub mod error;
pub mod graph;
pub mod ids;
pub mod limits;
pub mod members;
pub mod storage;
pub mod types;

pub use builder::GraphBuilder;
pub use contract::{ClassVersion, ContractDefinition, ContractReference, VersionSuffix};
pub use error::{ErrorKind, ProjectionError, Result};
pub use graph::{Ancestors, TypeGraph, UNKNOWN_PROPERTY_NAME, UNKNOWN_TYPE_NAME};
pub use ids::{MemberId, NamespaceId, TypeId};
pub use limits::{
    is_velocity_version, INITIAL_VERSION, MAX_VELOCITY_FEATURES, VELOCITY_VERSION_BASE,
    VELOCITY_VERSION_END,
};
pub use members::{
    ConstructorDefinition, DependencyPropertyInfo, EventDefinition, MemberDefinition, MemberKind,
    MethodDefinition, Modifiers, Parameter, PropertyDefinition, PropertyKind,
};
pub use storage::StorageClass;
pub use types::{
    AttributeDefinition, ClassDefinition, ClassFlags, DelegateDefinition, EnumDefinition,
    EnumValue, NamespaceDefinition, TypeDefinition, TypeKind, TypeModifiers, TypeReference,
};
