//! Release table: released class versions -> contract versions
//!
//! Each [`Release`] says "class versions from `first_version` onwards ship in
//! this contract version", until the next release takes over. Several class
//! versions can therefore fall under one concrete contract version, which is
//! exactly the situation the inclusion resolver has to detect.
//!
//! ## Example
//!
//! ```toml
//! [[releases]]
//! first_version = 1
//! contract = "Demo.FoundationContract"
//! contract_version = 1
//!
//! [[releases]]
//! first_version = 4
//! contract = "Demo.FoundationContract"
//! contract_version = 2
//! ```

use serde::{Deserialize, Serialize};
use typeproj_core::{is_velocity_version, ContractReference, Result, TypeGraph};

/// A release entry as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSpec {
    /// First class version shipped in this release
    pub first_version: u32,
    /// Fully-qualified contract name
    pub contract: String,
    /// Contract version of this release
    pub contract_version: u32,
}

/// A validated release entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// First class version shipped in this release
    pub first_version: u32,
    /// Contract version of this release
    pub contract: ContractReference,
}

/// Ordered table of releases
#[derive(Debug, Clone, Default)]
pub struct ReleaseTable {
    /// Sorted by `first_version`, unique
    releases: Vec<Release>,
}

impl ReleaseTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from configuration entries against a graph
    ///
    /// # Errors
    ///
    /// Fails if a contract name is unknown or a contract version is not
    /// registered by that contract.
    pub fn from_specs(graph: &TypeGraph, specs: &[ReleaseSpec]) -> Result<Self> {
        let mut table = Self::new();
        for spec in specs {
            let contract = graph.type_by_name(&spec.contract)?;
            let reference = graph.contract_ref(contract, spec.contract_version)?;
            table.insert(spec.first_version, reference);
        }
        Ok(table)
    }

    /// Add a release; a later insert for the same first version replaces it
    pub fn insert(&mut self, first_version: u32, contract: ContractReference) {
        match self
            .releases
            .binary_search_by_key(&first_version, |r| r.first_version)
        {
            Ok(i) => self.releases[i].contract = contract,
            Err(i) => self.releases.insert(
                i,
                Release {
                    first_version,
                    contract,
                },
            ),
        }
    }

    /// Contract version a released class version ships in
    ///
    /// Velocity versions and versions before the first release resolve to
    /// `None`.
    pub fn resolve(&self, version: u32) -> Option<&ContractReference> {
        if is_velocity_version(version) {
            return None;
        }
        let end = self.releases.partition_point(|r| r.first_version <= version);
        end.checked_sub(1).map(|i| &self.releases[i].contract)
    }

    /// All releases, ascending
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Number of releases
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
