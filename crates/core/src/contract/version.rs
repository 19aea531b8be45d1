//! Class version records
//!
//! A class declares one [`ClassVersion`] per release in which its public
//! interface changed. Each record pairs a version number with the suffix
//! appended to that version's generated interface names.
//!
//! ## Suffix Variants
//!
//! - **Empty**: version 1, no feature name (`IButton`)
//! - **Numeric**: a released version (`IButton2`)
//! - **Symbolic**: a velocity feature name (`IButtonFeature_Foo`)
//!
//! ## Ordering
//!
//! Class versions are totally ordered by version number. Velocity versions
//! sort after every released version because they are drawn from a range
//! above all released numbers.

use super::ContractReference;
use crate::limits::{is_velocity_version, INITIAL_VERSION};
use serde::Serialize;
use std::cmp::Ordering;

/// Parsed form of a version's interface-name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSuffix<'a> {
    /// No suffix at all
    Empty,
    /// Suffix parses as an integer
    Numeric(u32),
    /// Suffix is a feature name
    Symbolic(&'a str),
}

impl<'a> VersionSuffix<'a> {
    /// Parse a raw suffix
    pub fn parse(raw: &'a str) -> Self {
        if raw.is_empty() {
            VersionSuffix::Empty
        } else if let Ok(n) = raw.parse::<u32>() {
            VersionSuffix::Numeric(n)
        } else {
            VersionSuffix::Symbolic(raw)
        }
    }

    /// Check if the suffix is an integer
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, VersionSuffix::Numeric(_))
    }
}

/// One (version-number, interface-name-suffix) pair for a class
///
/// The projection for this version is not stored here: projections are
/// memoized by the projection engine in a map keyed by (class, version).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassVersion {
    number: u32,
    suffix: String,
    contract: Option<ContractReference>,
}

impl ClassVersion {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// The initial version: number 1, empty suffix
    pub fn initial() -> Self {
        ClassVersion {
            number: INITIAL_VERSION,
            suffix: String::new(),
            contract: None,
        }
    }

    /// A released version; its suffix is the decimal number
    ///
    /// Version 1 gets the empty suffix.
    pub fn numbered(number: u32) -> Self {
        if number == INITIAL_VERSION {
            return Self::initial();
        }
        ClassVersion {
            number,
            suffix: number.to_string(),
            contract: None,
        }
    }

    /// A velocity feature version; its suffix is the feature name
    ///
    /// Obtain `number` from a velocity registry so the mapping from feature
    /// name to number stays consistent across the run.
    pub fn feature(number: u32, feature_name: impl Into<String>) -> Self {
        ClassVersion {
            number,
            suffix: feature_name.into(),
            contract: None,
        }
    }

    /// Pin this version to an explicit contract version
    pub fn with_contract(mut self, contract: ContractReference) -> Self {
        self.contract = Some(contract);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Version number
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Raw interface-name suffix
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Parsed interface-name suffix
    pub fn parsed_suffix(&self) -> VersionSuffix<'_> {
        VersionSuffix::parse(&self.suffix)
    }

    /// Explicit contract pin, if any
    #[inline]
    pub fn contract(&self) -> Option<&ContractReference> {
        self.contract.as_ref()
    }

    /// Check if this version was allocated from the velocity range
    #[inline]
    pub fn is_velocity(&self) -> bool {
        is_velocity_version(self.number)
    }
}

impl PartialOrd for ClassVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}
