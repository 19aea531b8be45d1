//! Contract and velocity feature resolution
//!
//! This crate maps abstract version identifiers onto concrete, ordered
//! release contracts:
//! - VelocityRegistry: symbolic feature name -> number in the bounded velocity range
//! - ReleaseTable: released class version -> concrete contract version
//! - ContractResolver: per-(class, version) and per-member contract membership
//!
//! The registry is an explicit object passed to whoever needs it. There is no
//! process-global counter, so every test can use an isolated registry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod release;
pub mod resolver;
pub mod velocity;

pub use release::{Release, ReleaseSpec, ReleaseTable};
pub use resolver::{ContractAnnotations, ContractResolver};
pub use velocity::VelocityRegistry;
