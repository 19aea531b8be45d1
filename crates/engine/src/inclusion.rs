//! Interface-name inclusion
//!
//! Decides, per class version and [`InterfaceKind`], whether the generated
//! interface name must be written out explicitly or can be left for the
//! binary-interface generator to infer.
//!
//! ## Rules
//!
//! For a version whose suffix is:
//!
//! - **empty** (the initial version): never forced, except for the factory
//!   of an abstract class that has one
//! - **symbolic** (a velocity feature): forced whenever the projection has
//!   members of the kind
//! - **numeric**: every strictly earlier projection must already be cached.
//!   With members of the kind present, the name is forced when
//!   - an earlier projection with members of the kind falls under the same
//!     concrete contract version (collision), or
//!   - the immediately preceding projection has no members of the kind (gap), or
//!   - a [`LegacyCarveOut`] names the class and the version is past its cutoff
//!
//! [`InclusionResolver::resolve_class`] additionally marks the earlier side of
//! every collision, so both colliding versions get explicit names.

use crate::engine::ProjectionEngine;
use crate::interface::InterfaceKind;
use crate::projection::Projection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use typeproj_contracts::ContractAnnotations;
use typeproj_core::{ProjectionError, Result, TypeId, VersionSuffix};

/// A named historical exception that forces interface names for one type
///
/// This is a one-off compatibility rule, not a general policy: a type that
/// shipped past `after_version` with implicit names would otherwise change
/// its binary interface names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCarveOut {
    /// Fully-qualified class name
    pub type_name: String,
    /// Versions strictly greater than this are forced
    pub after_version: u32,
}

impl LegacyCarveOut {
    /// The single historical exception shipped by default
    pub fn historical() -> Self {
        LegacyCarveOut {
            type_name: "Windows.UI.Xaml.UIElement".to_string(),
            after_version: 4,
        }
    }

    /// Check if this carve-out forces `version` of `type_name`
    pub fn applies(&self, type_name: &str, version: u32) -> bool {
        self.type_name == type_name && version > self.after_version
    }
}

/// Why an interface name is forced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum InclusionReason {
    /// Abstract class factory at the initial version
    AbstractFactory,
    /// Velocity feature version with members of the kind
    SymbolicSuffix,
    /// Shares a concrete contract version with an earlier projection
    ContractCollision {
        /// Earliest colliding version
        earlier: u32,
    },
    /// The preceding projection had no members of the kind
    Gap {
        /// Preceding version
        previous: u32,
    },
    /// A named legacy exception
    LegacyCarveOut,
}

/// Per-kind inclusion flags of one class version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceNameFlags {
    /// Primary interface
    pub primary: bool,
    /// Statics interface
    pub statics: bool,
    /// Protected interface
    pub protected: bool,
    /// Overrides interface
    pub overrides: bool,
    /// Factory interface
    pub factory: bool,
}

impl InterfaceNameFlags {
    /// Flag of one kind
    pub fn get(&self, kind: InterfaceKind) -> bool {
        match kind {
            InterfaceKind::Primary => self.primary,
            InterfaceKind::Static => self.statics,
            InterfaceKind::Protected => self.protected,
            InterfaceKind::Virtual => self.overrides,
            InterfaceKind::Factory => self.factory,
        }
    }

    /// Set the flag of one kind
    pub fn set(&mut self, kind: InterfaceKind, value: bool) {
        let slot = match kind {
            InterfaceKind::Primary => &mut self.primary,
            InterfaceKind::Static => &mut self.statics,
            InterfaceKind::Protected => &mut self.protected,
            InterfaceKind::Virtual => &mut self.overrides,
            InterfaceKind::Factory => &mut self.factory,
        };
        *slot = value;
    }

    /// Kinds whose names must be emitted
    pub fn included(&self) -> impl Iterator<Item = InterfaceKind> + '_ {
        InterfaceKind::ALL.into_iter().filter(|k| self.get(*k))
    }
}

/// Inclusion decisions for every version of one class, ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInclusion {
    /// Class the decisions belong to
    pub class: TypeId,
    /// `(version, flags)` pairs, ascending by version
    pub versions: Vec<(u32, InterfaceNameFlags)>,
}

impl ClassInclusion {
    /// Flags of one version
    pub fn flags(&self, version: u32) -> Option<InterfaceNameFlags> {
        self.versions
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, f)| *f)
    }
}

/// Resolves interface-name inclusion against cached projections
pub struct InclusionResolver<'a, 'g> {
    engine: &'a ProjectionEngine<'g>,
    annotations: &'a ContractAnnotations,
    carve_outs: &'a [LegacyCarveOut],
}

impl<'a, 'g> InclusionResolver<'a, 'g> {
    /// Create a resolver
    pub fn new(
        engine: &'a ProjectionEngine<'g>,
        annotations: &'a ContractAnnotations,
        carve_outs: &'a [LegacyCarveOut],
    ) -> Self {
        InclusionResolver {
            engine,
            annotations,
            carve_outs,
        }
    }

    /// Whether the `kind` interface name of `version` must be emitted
    ///
    /// # Errors
    ///
    /// Returns `OrderingViolation` if the version's suffix is numeric and an
    /// earlier version of the class has not been projected yet, and
    /// `UnknownVersion` if the class does not declare `version`.
    pub fn should_include(&self, class: TypeId, version: u32, kind: InterfaceKind) -> Result<bool> {
        Ok(self.explain(class, version, kind)?.is_some())
    }

    /// The rule that forces the `kind` name of `version`, if any
    pub fn explain(
        &self,
        class: TypeId,
        version: u32,
        kind: InterfaceKind,
    ) -> Result<Option<InclusionReason>> {
        let graph = self.engine.graph();
        let class_version = graph.class_version(class, version)?;
        let suffix = class_version.parsed_suffix();
        // Ordering is checked before anything is memoized for `version`
        let earlier = if suffix.is_numeric() {
            self.earlier_projections(class, version)?
        } else {
            Vec::new()
        };
        let current = self.engine.project(class, version)?;
        let has_members = kind.has_members(graph, &current)?;

        let reason = match suffix {
            VersionSuffix::Empty => (has_members
                && kind == InterfaceKind::Factory
                && current.flags().is_abstract)
                .then_some(InclusionReason::AbstractFactory),
            VersionSuffix::Symbolic(_) => has_members.then_some(InclusionReason::SymbolicSuffix),
            VersionSuffix::Numeric(_) => {
                if has_members {
                    self.numeric_reason(class, version, kind, &earlier)?
                } else {
                    None
                }
            }
        };

        if let Some(reason) = reason {
            debug!(
                target: "typeproj::inclusion",
                class = graph.type_name(class),
                version,
                kind = %kind,
                ?reason,
                "Interface name forced"
            );
        }
        Ok(reason)
    }

    /// Decide every version and kind of a class
    ///
    /// Projects the versions in ascending order first, so it never trips the
    /// ordering check.
    pub fn resolve_class(&self, class: TypeId) -> Result<ClassInclusion> {
        let graph = self.engine.graph();
        let projections = self.engine.project_all(class)?;

        let mut versions: Vec<(u32, InterfaceNameFlags)> = projections
            .iter()
            .map(|p| (p.version(), InterfaceNameFlags::default()))
            .collect();

        for (i, projection) in projections.iter().enumerate() {
            let version = projection.version();
            let numeric = graph.class_version(class, version)?.parsed_suffix().is_numeric();
            for kind in InterfaceKind::ALL {
                if self.should_include(class, version, kind)? {
                    versions[i].1.set(kind, true);
                }
                if numeric && kind.has_members(graph, projection)? {
                    for partner in self.collisions(class, version, kind, &projections[..i])? {
                        if let Some(entry) = versions.iter_mut().find(|(v, _)| *v == partner) {
                            entry.1.set(kind, true);
                        }
                    }
                }
            }
        }

        Ok(ClassInclusion { class, versions })
    }

    /// Cached projections strictly before `version`, ascending
    fn earlier_projections(&self, class: TypeId, version: u32) -> Result<Vec<Arc<Projection>>> {
        let graph = self.engine.graph();
        graph
            .class(class)?
            .versions_before(version)
            .iter()
            .map(|v| {
                self.engine.cached(class, v.number()).ok_or_else(|| {
                    ProjectionError::OrderingViolation {
                        type_name: graph.type_name(class).to_string(),
                        version,
                        missing: v.number(),
                    }
                })
            })
            .collect()
    }

    /// Earlier versions with members of `kind` sharing this version's contract
    fn collisions(
        &self,
        class: TypeId,
        version: u32,
        kind: InterfaceKind,
        earlier: &[Arc<Projection>],
    ) -> Result<Vec<u32>> {
        let graph = self.engine.graph();
        let Some(contract) = self.annotations.version_contract(class, version) else {
            return Ok(Vec::new());
        };
        let mut partners = Vec::new();
        for projection in earlier {
            let same_contract =
                self.annotations.version_contract(class, projection.version()) == Some(contract);
            if same_contract && kind.has_members(graph, projection)? {
                partners.push(projection.version());
            }
        }
        Ok(partners)
    }

    fn numeric_reason(
        &self,
        class: TypeId,
        version: u32,
        kind: InterfaceKind,
        earlier: &[Arc<Projection>],
    ) -> Result<Option<InclusionReason>> {
        let graph = self.engine.graph();

        if let Some(&first) = self.collisions(class, version, kind, earlier)?.first() {
            return Ok(Some(InclusionReason::ContractCollision { earlier: first }));
        }

        if let Some(previous) = earlier.last() {
            if !kind.has_members(graph, previous)? {
                return Ok(Some(InclusionReason::Gap {
                    previous: previous.version(),
                }));
            }
        }

        let type_name = graph.type_name(class);
        if !earlier.is_empty() && self.carve_outs.iter().any(|c| c.applies(type_name, version)) {
            warn!(
                target: "typeproj::inclusion",
                class = type_name,
                version,
                kind = %kind,
                "Legacy carve-out forced interface name"
            );
            return Ok(Some(InclusionReason::LegacyCarveOut));
        }

        Ok(None)
    }
}
