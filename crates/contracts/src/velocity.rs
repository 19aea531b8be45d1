//! Velocity feature registry
//!
//! A velocity feature is an in-progress capability that has no release
//! number yet. The first request for an unseen feature name allocates the
//! next free slot of the fixed velocity range; the mapping never changes
//! afterwards.
//!
//! ## Capacity
//!
//! The range holds [`MAX_VELOCITY_FEATURES`] slots. Allocating past it is a
//! fatal configuration error: the feature space is fixed at design time.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use typeproj_core::limits::velocity_version_for_slot;
use typeproj_core::{
    is_velocity_version, ClassVersion, ProjectionError, Result, TypeGraph, TypeId, VersionSuffix,
    MAX_VELOCITY_FEATURES, VELOCITY_VERSION_BASE,
};

/// Registry of velocity feature names and their version numbers
#[derive(Debug, Clone, Default)]
pub struct VelocityRegistry {
    by_name: FxHashMap<String, u32>,
    /// Feature names by slot
    names: Vec<String>,
}

impl VelocityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Version number of a feature, allocating one on first use
    ///
    /// # Errors
    ///
    /// Returns `VelocityCapacityExhausted` when every slot is taken.
    pub fn allocate(&mut self, feature: &str) -> Result<u32> {
        if let Some(&version) = self.by_name.get(feature) {
            return Ok(version);
        }

        let slot = self.names.len() as u32;
        let version = velocity_version_for_slot(slot).ok_or_else(|| {
            warn!(
                target: "typeproj::contracts",
                feature,
                capacity = MAX_VELOCITY_FEATURES,
                "Velocity feature space exhausted"
            );
            ProjectionError::VelocityCapacityExhausted {
                feature: feature.to_string(),
                capacity: MAX_VELOCITY_FEATURES,
            }
        })?;

        self.by_name.insert(feature.to_string(), version);
        self.names.push(feature.to_string());
        debug!(target: "typeproj::contracts", feature, version, "Velocity feature allocated");
        Ok(version)
    }

    /// A class version for a velocity feature, allocating on first use
    pub fn feature_version(&mut self, feature: &str) -> Result<ClassVersion> {
        let number = self.allocate(feature)?;
        Ok(ClassVersion::feature(number, feature))
    }

    /// Check every feature-named class version in `graph` against this
    /// registry
    ///
    /// Features are visited in ascending version order. An unseen feature
    /// is allocated the next free slot, so a graph whose versions came from
    /// a registry seeded the same way reconciles cleanly.
    ///
    /// # Errors
    ///
    /// Returns `VelocityFeatureMismatch` naming the first class whose
    /// declared number differs from the registered one, or
    /// `VelocityCapacityExhausted` if allocation runs out of slots.
    pub fn reconcile(&mut self, graph: &TypeGraph) -> Result<()> {
        let mut declared: Vec<(u32, &str, TypeId)> = graph
            .classes()
            .flat_map(|(class, definition)| {
                definition.versions().iter().filter_map(move |v| match v.parsed_suffix() {
                    VersionSuffix::Symbolic(name) => Some((v.number(), name, class)),
                    _ => None,
                })
            })
            .collect();
        declared.sort_by_key(|&(number, _, _)| number);

        for (number, feature, class) in declared {
            let registered = self.allocate(feature)?;
            if registered != number {
                return Err(ProjectionError::VelocityFeatureMismatch {
                    type_name: graph.type_name(class).to_string(),
                    feature: feature.to_string(),
                    declared: number,
                    registered,
                });
            }
        }
        debug!(
            target: "typeproj::contracts",
            features = self.len(),
            "Velocity features reconciled"
        );
        Ok(())
    }

    /// Version number of an already-allocated feature
    pub fn lookup(&self, feature: &str) -> Option<u32> {
        self.by_name.get(feature).copied()
    }

    /// Feature name allocated to a velocity version number
    pub fn feature_name(&self, version: u32) -> Option<&str> {
        if !is_velocity_version(version) {
            return None;
        }
        self.names
            .get((version - VELOCITY_VERSION_BASE) as usize)
            .map(String::as_str)
    }

    /// Check whether a version number lies in the velocity range
    #[inline]
    pub fn is_velocity(&self, version: u32) -> bool {
        is_velocity_version(version)
    }

    /// Number of allocated features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing has been allocated
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slots still free
    pub fn remaining(&self) -> u32 {
        MAX_VELOCITY_FEATURES - self.names.len() as u32
    }
}
