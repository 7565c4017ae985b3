//! Error taxonomy for the picker core
//!
//! One crate-wide enum, split along the boundaries callers actually handle:
//! path resolution problems are data-dependent and degrade discovery to an
//! empty result, while auto-pick and policy misuse indicate a programming
//! inconsistency and are meant to be surfaced loudly.

use thiserror::Error;

use crate::config::{AutoPickMode, PickerKind};
use crate::registry::{FieldType, TypeName};
use crate::world::ObjectId;

/// Result type for the `refpick_core` library
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Failure categories produced by the picker core
#[derive(Debug, Error)]
pub enum Error {
    /// A named field is absent on the resolved type and its whole base chain
    #[error("field '{field}' not found on type '{type_name}' or any of its base types")]
    FieldNotFound {
        /// Type the lookup started from (most-derived)
        type_name: TypeName,
        /// Field name that could not be resolved
        field:     String,
    },

    /// The property path string does not follow the host encoding
    #[error("invalid property path '{path}': {reason}")]
    InvalidPath {
        /// The offending path, verbatim
        path:   String,
        /// What the parser objected to
        reason: String,
    },

    /// An auto-pick strategy ran to completion without a passing candidate
    #[error("no auto-pick candidate for type '{target}' using {mode}")]
    NoAutoPickCandidate {
        /// Strategy that was exercised
        mode:   AutoPickMode,
        /// Component type the strategy searched for
        target: TypeName,
    },

    /// A picker was requested for a field that is not a reference slot
    #[error("path '{path}' resolves to '{declared}', which is not an object reference")]
    NonReferenceField {
        /// The property path, verbatim
        path:     String,
        /// Resolved declared type of the field
        declared: FieldType,
    },

    /// A type name has no entry in the registry
    #[error("type '{0}' is not registered")]
    TypeNotRegistered(TypeName),

    /// An object handle the host cannot answer type queries for
    #[error("object '{0}' is unknown to the host")]
    UnknownObject(ObjectId),

    /// An index step was applied to a declared type that is not a collection
    #[error("cannot take element {index} of non-collection type '{declared}'")]
    UnresolvedCollectionElement {
        /// Declared type at the point of the index step
        declared: FieldType,
        /// Element index the path asked for
        index:    usize,
    },

    /// An auto-pick mode reached dispatch without a strategy behind it
    ///
    /// `Default` must be resolved against the session configuration before
    /// dispatch; seeing it here is a programming error, not a data problem.
    #[error("auto-pick mode '{0}' has no strategy")]
    UnsupportedAutoPickMode(AutoPickMode),

    /// A picker kind reached presentation selection without a handler
    #[error("picker kind '{0}' has no handler")]
    UnsupportedPickerKind(PickerKind),
}

impl Error {
    /// Create an [`Error::InvalidPath`] for the given path and reason
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path:   path.into(),
            reason: reason.into(),
        }
    }

    /// Create an [`Error::FieldNotFound`] rooted at `type_name`
    #[must_use]
    pub fn field_not_found(type_name: impl Into<TypeName>, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            type_name: type_name.into(),
            field:     field.into(),
        }
    }

    /// True for the failures that should abort the edit session rather than
    /// degrade it (policy/programming inconsistencies)
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAutoPickMode(_) | Self::UnsupportedPickerKind(_)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unhandled_picker_kind_fails_loudly() {
        let error = Error::UnsupportedPickerKind(PickerKind::Default);
        assert_eq!(error.to_string(), "picker kind 'default' has no handler");
        assert!(error.is_programming_error());
    }

    #[test]
    fn test_degradable_failures_stay_recoverable() {
        let error = Error::TypeNotRegistered("Ghost".into());
        assert_eq!(error.to_string(), "type 'Ghost' is not registered");
        assert!(!error.is_programming_error());
    }
}
