//! Contract resolution for class versions and members
//!
//! A class version falls under a concrete contract version by one of, in
//! order:
//!
//! 1. an explicit pin on the [`ClassVersion`](typeproj_core::ClassVersion)
//! 2. nothing, if the class or the version is velocity-scoped
//! 3. the release table entry covering the version number
//!
//! A member supports its explicitly listed contracts, or else the contract of
//! the class version that introduced it.

use crate::release::ReleaseTable;
use rustc_hash::FxHashMap;
use tracing::debug;
use typeproj_core::{ContractReference, MemberId, Result, TypeGraph, TypeId};

/// Resolves contract membership against a release table
#[derive(Debug, Clone, Default)]
pub struct ContractResolver {
    releases: ReleaseTable,
}

impl ContractResolver {
    /// Create a resolver over a release table
    pub fn new(releases: ReleaseTable) -> Self {
        ContractResolver { releases }
    }

    /// The release table
    pub fn releases(&self) -> &ReleaseTable {
        &self.releases
    }

    /// Concrete contract version of a class version
    ///
    /// # Errors
    ///
    /// Returns `UnknownVersion` if the class does not declare `version`.
    pub fn version_contract(
        &self,
        graph: &TypeGraph,
        class: TypeId,
        version: u32,
    ) -> Result<Option<ContractReference>> {
        let definition = graph.class(class)?;
        let class_version = graph.class_version(class, version)?;

        if let Some(pinned) = class_version.contract() {
            return Ok(Some(pinned.clone()));
        }
        if definition.velocity_version.is_some() || class_version.is_velocity() {
            return Ok(None);
        }
        Ok(self.releases.resolve(version).cloned())
    }

    /// Contracts a member supports
    pub fn member_contracts(
        &self,
        graph: &TypeGraph,
        member: MemberId,
    ) -> Result<Vec<ContractReference>> {
        let member = graph.member(member)?;
        if !member.supported_contracts().is_empty() {
            return Ok(member.supported_contracts().to_vec());
        }
        Ok(self
            .version_contract(graph, member.declaring_type(), member.version())?
            .into_iter()
            .collect())
    }

    /// Resolve contract membership for every class version and member
    pub fn annotate(&self, graph: &TypeGraph) -> Result<ContractAnnotations> {
        let mut annotations = ContractAnnotations::default();
        for (class_id, class) in graph.classes() {
            for version in class.versions() {
                let contract = self.version_contract(graph, class_id, version.number())?;
                annotations
                    .versions
                    .insert((class_id, version.number()), contract);
            }
            for &member in class.members() {
                let contracts = self.member_contracts(graph, member)?;
                annotations.members.insert(member, contracts);
            }
        }
        debug!(
            target: "typeproj::contracts",
            versions = annotations.versions.len(),
            members = annotations.members.len(),
            "Contract membership annotated"
        );
        Ok(annotations)
    }
}

/// Contract membership of every class version and member in a graph
#[derive(Debug, Clone, Default)]
pub struct ContractAnnotations {
    versions: FxHashMap<(TypeId, u32), Option<ContractReference>>,
    members: FxHashMap<MemberId, Vec<ContractReference>>,
}

impl ContractAnnotations {
    /// Contract of a class version, `None` if unresolved or not annotated
    pub fn version_contract(&self, class: TypeId, version: u32) -> Option<&ContractReference> {
        self.versions
            .get(&(class, version))
            .and_then(Option::as_ref)
    }

    /// Contracts a member supports; empty if none or not annotated
    pub fn member_contracts(&self, member: MemberId) -> &[ContractReference] {
        self.members
            .get(&member)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
