//! Contract and version types
//!
//! This module contains the types that pin a member or class version to a
//! capability boundary:
//!
//! 1. **Contracts** are named, versioned capability boundaries (`ContractDefinition`)
//! 2. **References** pin a (contract, version) pair (`ContractReference`) and are
//!    only constructible against a version the contract declares
//! 3. **Class versions** pair a version number with an interface-name suffix
//!    (`ClassVersion`)
//!
//! ## Module Structure
//!
//! - `definition`: Contract declarations
//! - `reference`: Validated contract references
//! - `version`: Class version records and suffix parsing

pub mod definition;
pub mod reference;
pub mod version;

// Re-exports
pub use definition::ContractDefinition;
pub use reference::ContractReference;
pub use version::{ClassVersion, VersionSuffix};
