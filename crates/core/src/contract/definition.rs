//! Contract declarations

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named, versioned capability boundary
///
/// A contract declares the set of versions it has shipped. Members and class
/// versions opt into a contract through a
/// [`ContractReference`](super::ContractReference), which can only pin a
/// version present in this set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractDefinition {
    /// Registered contract versions, ascending
    versions: BTreeSet<u32>,
}

impl ContractDefinition {
    /// Create a contract with the given registered versions
    pub fn new(versions: impl IntoIterator<Item = u32>) -> Self {
        ContractDefinition {
            versions: versions.into_iter().collect(),
        }
    }

    /// Check whether the contract registered `version`
    #[inline]
    pub fn declares(&self, version: u32) -> bool {
        self.versions.contains(&version)
    }

    /// Highest registered version
    pub fn latest(&self) -> Option<u32> {
        self.versions.iter().next_back().copied()
    }

    /// All registered versions, ascending
    pub fn versions(&self) -> impl Iterator<Item = u32> + '_ {
        self.versions.iter().copied()
    }
}
