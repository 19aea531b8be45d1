//! Projector configuration via `typeproj.toml`
//!
//! Holds the inputs of a generation run that do not live in the type graph:
//! the release table, the legacy inclusion carve-outs and the velocity
//! features whose numbering must stay stable from run to run. The velocity
//! range itself is a compile-time constant and cannot be configured.

use crate::inclusion::LegacyCarveOut;
use serde::{Deserialize, Serialize};
use std::path::Path;
use typeproj_contracts::{ReleaseSpec, ReleaseTable, VelocityRegistry};
use typeproj_core::{ProjectionError, Result, TypeGraph};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "typeproj.toml";

/// Projector configuration loaded from `typeproj.toml`.
///
/// # Example
///
/// ```toml
/// velocity_features = ["Feature_Flyouts"]
///
/// [[releases]]
/// first_version = 1
/// contract = "Demo.FoundationContract"
/// contract_version = 1
///
/// [[legacy_interface_carve_outs]]
/// type_name = "Windows.UI.Xaml.UIElement"
/// after_version = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Velocity features pre-registered in this order
    #[serde(default)]
    pub velocity_features: Vec<String>,
    /// Class version ranges and the contract versions they ship in
    #[serde(default)]
    pub releases: Vec<ReleaseSpec>,
    /// Types forced to emit interface names past a cutoff version
    #[serde(default = "default_carve_outs")]
    pub legacy_interface_carve_outs: Vec<LegacyCarveOut>,
}

fn default_carve_outs() -> Vec<LegacyCarveOut> {
    vec![LegacyCarveOut::historical()]
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            velocity_features: Vec::new(),
            releases: Vec::new(),
            legacy_interface_carve_outs: default_carve_outs(),
        }
    }
}

impl ProjectorConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# typeproj configuration
#
# Velocity features registered up front, in order. Listing a feature here
# pins its version number regardless of the order classes mention it.
velocity_features = []

# Releases: class versions from `first_version` onwards ship in the given
# contract version, until the next release takes over.
# [[releases]]
# first_version = 1
# contract = "Demo.FoundationContract"
# contract_version = 1

# Legacy exception: this type always emits explicit interface names past
# version 4. Do not add entries here for new types.
[[legacy_interface_carve_outs]]
type_name = "Windows.UI.Xaml.UIElement"
after_version = 4
"#
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProjectorConfig = toml::from_str(content)
            .map_err(|e| ProjectionError::configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProjectionError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ProjectorConfig = toml::from_str(&content).map_err(|e| {
            ProjectionError::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                ProjectionError::configuration(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ProjectionError::configuration(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content).map_err(|e| {
            ProjectionError::configuration(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Reject entries that cannot be meaningful for any graph
    fn validate(&self) -> Result<()> {
        let mut seen = rustc_hash::FxHashSet::default();
        for release in &self.releases {
            if !seen.insert(release.first_version) {
                return Err(ProjectionError::configuration(format!(
                    "Release for version {} is listed twice",
                    release.first_version
                )));
            }
        }
        if let Some(empty) = self.velocity_features.iter().find(|f| f.trim().is_empty()) {
            return Err(ProjectionError::configuration(format!(
                "Invalid velocity feature name '{}'",
                empty
            )));
        }
        Ok(())
    }

    /// Release table for `graph`
    ///
    /// # Errors
    ///
    /// Fails with an input-corruption error if a release names an unknown
    /// contract or an unregistered contract version.
    pub fn release_table(&self, graph: &TypeGraph) -> Result<ReleaseTable> {
        ReleaseTable::from_specs(graph, &self.releases)
    }

    /// Velocity registry with the configured features pre-registered
    ///
    /// # Errors
    ///
    /// Returns `VelocityCapacityExhausted` if more features are listed than
    /// the velocity range holds.
    pub fn velocity_registry(&self) -> Result<VelocityRegistry> {
        let mut registry = VelocityRegistry::new();
        for feature in &self.velocity_features {
            registry.allocate(feature)?;
        }
        Ok(registry)
    }
}
