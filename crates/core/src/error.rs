//! Error types for the projection pipeline
//!
//! This module defines the single error hierarchy shared by every layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Error Kinds
//!
//! Every error falls into exactly one [`ErrorKind`]:
//!
//! - **InputCorruption**: the type graph violates a structural invariant
//!   (unknown version, unregistered contract version, inheritance cycle).
//! - **OrderingViolation**: driver code asked for an inclusion decision before
//!   the earlier projections it depends on were computed.
//! - **CapacityExhausted**: the fixed velocity feature range ran out.
//! - **Configuration**: the projector configuration file could not be used.
//!
//! None of these are recoverable. A generation run that observes one aborts.

use crate::ids::{MemberId, TypeId};
use thiserror::Error;

/// Result type alias for projection operations
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Classification of a [`ProjectionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input type graph is structurally invalid
    InputCorruption,
    /// Projections were requested out of ascending version order
    OrderingViolation,
    /// A compile-time bounded resource ran out
    CapacityExhausted,
    /// The projector configuration is unusable
    Configuration,
}

/// Error types for the projection pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Two types share the same fully-qualified name
    #[error("Duplicate type name: {name}")]
    DuplicateType {
        /// Fully-qualified name
        name: String,
    },

    /// A type was looked up by a name the graph does not contain
    #[error("Unknown type: {name}")]
    UnknownType {
        /// Name that was requested
        name: String,
    },

    /// A type id does not address any type in the graph
    #[error("Invalid type id: {id}")]
    InvalidTypeId {
        /// Offending id
        id: TypeId,
    },

    /// A member id does not address any member in the graph
    #[error("Invalid member id: {id}")]
    InvalidMemberId {
        /// Offending id
        id: MemberId,
    },

    /// A type was used where a different kind of type is required
    #[error("Type {type_name} is not a {expected}")]
    WrongTypeKind {
        /// Fully-qualified name of the offending type
        type_name: String,
        /// Kind that was required at the use site
        expected: &'static str,
    },

    /// Following base-class links from a class returns to that class
    #[error("Inheritance cycle detected at {type_name}")]
    InheritanceCycle {
        /// A class on the cycle
        type_name: String,
    },

    /// A class declares no versions at all
    #[error("Class {type_name} declares no versions")]
    MissingVersions {
        /// Fully-qualified class name
        type_name: String,
    },

    /// A class declares the same version number twice
    #[error("Class {type_name} declares version {version} more than once")]
    DuplicateVersion {
        /// Fully-qualified class name
        type_name: String,
        /// Repeated version number
        version: u32,
    },

    /// A version was requested that the class does not declare
    #[error("Version {version} is not declared by {type_name}")]
    UnknownVersion {
        /// Fully-qualified class name
        type_name: String,
        /// Requested version number
        version: u32,
    },

    /// A member references a version absent from its class's version list
    #[error("Member {type_name}.{member} references version {version}, which {type_name} does not declare")]
    MemberVersionOutOfRange {
        /// Fully-qualified class name
        type_name: String,
        /// Member name
        member: String,
        /// Offending version number
        version: u32,
    },

    /// A contract reference pins a version the contract never registered
    #[error("Contract {contract} does not declare version {version}")]
    UnregisteredContractVersion {
        /// Fully-qualified contract name
        contract: String,
        /// Requested contract version
        version: u32,
    },

    /// A velocity version number sits outside the velocity range, or a
    /// released version number sits inside it
    #[error("Version {version} on {type_name} is on the wrong side of the velocity range")]
    InvalidVelocityVersion {
        /// Fully-qualified class name
        type_name: String,
        /// Offending version number
        version: u32,
    },

    /// A velocity feature is declared at a number its registry does not give it
    #[error("Feature '{feature}' on {type_name} is declared as version {declared} but registered as {registered}")]
    VelocityFeatureMismatch {
        /// Fully-qualified class name
        type_name: String,
        /// Feature name carried by the version suffix
        feature: String,
        /// Version number the class declares
        declared: u32,
        /// Version number the registry allocated for the feature
        registered: u32,
    },

    /// An inclusion decision needed an earlier projection that was never computed
    #[error("Projection of {type_name} version {version} requested before version {missing} was projected")]
    OrderingViolation {
        /// Fully-qualified class name
        type_name: String,
        /// Version whose decision was requested
        version: u32,
        /// Earlier version that has no cached projection
        missing: u32,
    },

    /// The bounded velocity feature range is exhausted
    #[error("Velocity feature space exhausted: cannot allocate '{feature}' (capacity {capacity})")]
    VelocityCapacityExhausted {
        /// Feature name that could not be allocated
        feature: String,
        /// Fixed capacity of the range
        capacity: u32,
    },

    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProjectionError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectionError::OrderingViolation { .. } => ErrorKind::OrderingViolation,
            ProjectionError::VelocityCapacityExhausted { .. } => ErrorKind::CapacityExhausted,
            ProjectionError::Configuration(_) => ErrorKind::Configuration,
            _ => ErrorKind::InputCorruption,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ProjectionError::Configuration(message.into())
    }

    /// True if the input model itself is invalid
    pub fn is_input_corruption(&self) -> bool {
        self.kind() == ErrorKind::InputCorruption
    }
}
