//! Validated contract references

use super::ContractDefinition;
use crate::error::{ProjectionError, Result};
use crate::ids::TypeId;
use serde::Serialize;
use std::fmt;

/// A (contract, version) pin
///
/// ## Invariants
///
/// - The referenced contract declared `version` when the reference was made
/// - References compare equal iff they pin the same contract and version,
///   which is what "falls under the same concrete contract version" means
///   to the inclusion resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractReference {
    contract: TypeId,
    contract_name: String,
    version: u32,
}

impl ContractReference {
    /// Pin `version` of a contract
    ///
    /// # Errors
    ///
    /// Returns `UnregisteredContractVersion` if the contract does not declare
    /// `version`. That indicates a corrupt input model and is never recovered.
    pub fn new(
        contract: TypeId,
        contract_name: impl Into<String>,
        definition: &ContractDefinition,
        version: u32,
    ) -> Result<Self> {
        let contract_name = contract_name.into();
        if !definition.declares(version) {
            return Err(ProjectionError::UnregisteredContractVersion {
                contract: contract_name,
                version,
            });
        }
        Ok(ContractReference {
            contract,
            contract_name,
            version,
        })
    }

    /// Id of the contract type
    #[inline]
    pub fn contract(&self) -> TypeId {
        self.contract
    }

    /// Fully-qualified contract name
    #[inline]
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// Pinned contract version
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }
}

impl fmt::Display for ContractReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.contract_name, self.version)
    }
}
