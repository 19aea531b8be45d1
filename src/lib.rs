//! typeproj - version-aware type projection for binary interface generation
//!
//! typeproj takes one version-agnostic description of a class library and
//! derives, for every declared version of every class, the members that
//! changed, which generated interface names must be written out, and how
//! each dependency property is stored and enumerated.
//!
//! # Quick Start
//!
//! ```
//! use typeproj::{
//!     generate, ClassDefinition, GraphBuilder, InterfaceKind, MemberDefinition, ProjectorConfig,
//! };
//!
//! let mut builder = GraphBuilder::new();
//! let ns = builder.namespace("Demo");
//! let button = builder
//!     .add_class(ns, "Button", ClassDefinition::new().with_version_numbers([1, 2]))
//!     .unwrap();
//! builder
//!     .add_member(button, MemberDefinition::method("Reset", 2, None, vec![]).with_static())
//!     .unwrap();
//! let graph = builder.build().unwrap();
//!
//! let plan = generate(&graph, &ProjectorConfig::default()).unwrap();
//! let v2 = plan.class("Demo.Button").unwrap().version(2).unwrap();
//! assert!(v2.is_explicit(InterfaceKind::Static));
//! assert_eq!(v2.interface(InterfaceKind::Static).unwrap().name, "IButtonStatics2");
//! ```
//!
//! # Architecture
//!
//! - [`typeproj_core`]: the type graph, its builder and the error type
//! - [`typeproj_contracts`]: velocity registry, release table, contract resolution
//! - [`typeproj_engine`]: projections, interface-name inclusion, configuration
//! - [`typeproj_layout`]: slots, type-table indices, enumeration chains
//!
//! [`Generator`] runs them in the required order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod generator;

pub use generator::{
    generate, resolver_for, ClassPlan, ClassVersionPlan, GenerationPlan, Generator, InterfacePlan,
    MemberContractPlan,
};

pub use typeproj_contracts::{
    ContractAnnotations, ContractResolver, Release, ReleaseSpec, ReleaseTable, VelocityRegistry,
};
pub use typeproj_core::*;
pub use typeproj_engine::{
    ClassInclusion, EngineMetrics, InclusionReason, InclusionResolver, InterfaceKind,
    InterfaceNameFlags, LegacyCarveOut, ProjectedMembers, Projection, ProjectionEngine,
    ProjectorConfig, CONFIG_FILE_NAME,
};
pub use typeproj_layout::{
    is_slotted, Chain, ClassLayout, LayoutPlanner, PropertyLayout, SlotPlanner, TypeTable,
};
