//! Property storage classification
//!
//! A dependency property is stored in exactly one of four ways. The
//! classification is derived from the property's metadata in a fixed
//! precedence order, never asserted by a caller:
//!
//! 1. **SimpleInline**: the simple-storage marker is present
//! 2. **Field**: a backing field name is present
//! 3. **SparseGroup**: a storage-group ensure-method name is present
//! 4. **Sparse**: none of the above
//!
//! Implicit content properties without any storage metadata have no storage
//! of their own and are not classified.

use crate::members::{DependencyPropertyInfo, MemberDefinition};
use serde::{Deserialize, Serialize};

/// How a dependency property's value is stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StorageClass {
    /// Stored inline as a simple value
    SimpleInline,
    /// Stored in a dedicated instance field
    Field {
        /// Field name
        field_name: String,
    },
    /// Stored sparsely inside a lazily-ensured storage group
    SparseGroup {
        /// Method that ensures the group exists
        ensure_method: String,
    },
    /// Stored in the sparse value table
    Sparse,
}

impl StorageClass {
    /// Classify a property's storage from its metadata
    ///
    /// Returns `None` for an implicit content property with no storage
    /// metadata.
    pub fn classify(info: &DependencyPropertyInfo) -> Option<StorageClass> {
        if info.is_simple {
            Some(StorageClass::SimpleInline)
        } else if let Some(field_name) = &info.field_name {
            Some(StorageClass::Field {
                field_name: field_name.clone(),
            })
        } else if let Some(method) = &info.storage_group_method {
            Some(StorageClass::SparseGroup {
                ensure_method: method.clone(),
            })
        } else if info.is_implicit_content {
            None
        } else {
            Some(StorageClass::Sparse)
        }
    }

    /// Classify a member; `None` for anything but a stored dependency property
    pub fn of_member(member: &MemberDefinition) -> Option<StorageClass> {
        member
            .as_property()
            .and_then(|p| p.dependency_info())
            .and_then(Self::classify)
    }

    /// Check for field-backed storage
    #[inline]
    pub fn is_field_backed(&self) -> bool {
        matches!(self, StorageClass::Field { .. })
    }

    /// Check for either sparse strategy
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, StorageClass::Sparse | StorageClass::SparseGroup { .. })
    }

    /// Check for simple inline storage
    #[inline]
    pub fn is_simple(&self) -> bool {
        matches!(self, StorageClass::SimpleInline)
    }

    /// Short strategy name for diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::SimpleInline => "simple",
            StorageClass::Field { .. } => "field",
            StorageClass::SparseGroup { .. } => "sparse_group",
            StorageClass::Sparse => "sparse",
        }
    }
}
