//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;
pub use typeproj::{
    ClassDefinition, ContractResolver, DependencyPropertyInfo, GraphBuilder, MemberDefinition,
    MemberId, NamespaceId, ProjectorConfig, ReleaseSpec, TypeGraph, TypeId, TypeReference,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness (shown for failing tests).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Library - graph builder wrapper with a fixed "Demo" namespace
// ============================================================================

/// Builds a test library in namespace `Demo` with one contract,
/// `Demo.FoundationContract`, registering versions 1 through 4.
pub struct Library {
    pub builder: GraphBuilder,
    pub ns: NamespaceId,
    pub contract: TypeId,
}

impl Library {
    pub fn new() -> Self {
        init_tracing();
        let mut builder = GraphBuilder::new();
        let ns = builder.namespace("Demo");
        let contract = builder
            .add_contract(ns, "FoundationContract", [1, 2, 3, 4])
            .unwrap();
        Library {
            builder,
            ns,
            contract,
        }
    }

    /// Declare a class with numbered versions
    pub fn class(&mut self, name: &str, versions: &[u32]) -> TypeId {
        self.class_with(name, ClassDefinition::new().with_version_numbers(versions.iter().copied()))
    }

    /// Declare a class from a full definition
    pub fn class_with(&mut self, name: &str, definition: ClassDefinition) -> TypeId {
        self.builder.add_class(self.ns, name, definition).unwrap()
    }

    /// Add a member
    pub fn member(&mut self, class: TypeId, member: MemberDefinition) -> MemberId {
        self.builder.add_member(class, member).unwrap()
    }

    /// Add a dependency property of type `class` at version 1
    pub fn dp(&mut self, class: TypeId, name: &str, info: DependencyPropertyInfo) -> MemberId {
        let t = TypeReference::to(class);
        self.member(class, MemberDefinition::dependency_property(name, 1, t, info))
    }

    pub fn build(self) -> TypeGraph {
        self.builder.build().unwrap()
    }
}

/// Release entry against `Demo.FoundationContract`
pub fn release(first_version: u32, contract_version: u32) -> ReleaseSpec {
    ReleaseSpec {
        first_version,
        contract: "Demo.FoundationContract".to_string(),
        contract_version,
    }
}

/// Config with the given releases and no legacy carve-outs
pub fn config_with_releases(releases: Vec<ReleaseSpec>) -> ProjectorConfig {
    ProjectorConfig {
        releases,
        legacy_interface_carve_outs: Vec::new(),
        ..ProjectorConfig::default()
    }
}

/// Name of a member
pub fn member_name(graph: &TypeGraph, member: MemberId) -> String {
    graph.member(member).unwrap().name().to_string()
}
