//! Projection engine for typeproj
//!
//! This crate turns a validated type graph into per-version snapshots and
//! decides which generated interface names must be emitted:
//! - Projection: the members of one class at one version
//! - ProjectionEngine: memoized `project(class, version)` with stable identity
//! - InterfaceKind: the five interfaces a class version can surface
//! - InclusionResolver: explicit-vs-implicit interface names per version
//! - ProjectorConfig: `typeproj.toml` (releases, carve-outs, velocity features)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod inclusion;
pub mod interface;
pub mod projection;

pub use config::{ProjectorConfig, CONFIG_FILE_NAME};
pub use engine::{EngineMetrics, ProjectionEngine};
pub use inclusion::{
    ClassInclusion, InclusionReason, InclusionResolver, InterfaceNameFlags, LegacyCarveOut,
};
pub use interface::InterfaceKind;
pub use projection::{ProjectedMembers, Projection};
