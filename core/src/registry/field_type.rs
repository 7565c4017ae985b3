//! Declared shapes of serialized fields
//!
//! The registry describes every field as one of five shapes. Path resolution
//! walks through `Struct` fields and into collection elements; the discovery
//! engine only ever starts from a `Reference` terminal.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::type_name::TypeName;

/// Primitive field shapes that terminate path resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    /// Boolean flag
    Bool,
    /// Floating point number
    Float,
    /// Integral number
    Int,
    /// Text value
    Text,
}

/// The declared type of a single serialized field
///
/// Collections carry their element shape directly: concrete arrays because
/// the element type is part of the declaration, list-likes because the single
/// element parameter is all the host encodes. Both answer
/// [`element_type`](Self::element_type) the same way, which is exactly the
/// distinction path resolution cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Fixed-size collection of a single element shape
    Array(Box<FieldType>),
    /// Growable list-like collection of a single element shape
    List(Box<FieldType>),
    /// Reference to a store object (node, component, or asset) of the named type
    Reference(TypeName),
    /// Primitive terminal
    Scalar(ScalarKind),
    /// Nested serializable struct of the named type; resolution continues into it
    Struct(TypeName),
}

impl FieldType {
    /// Convenience constructor for a list of the given element shape
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Convenience constructor for an array of the given element shape
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// True for the two collection shapes
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array(_) | Self::List(_))
    }

    /// The declared element shape, for collections
    #[must_use]
    pub fn element_type(&self) -> Option<&Self> {
        match self {
            Self::Array(element) | Self::List(element) => Some(element),
            Self::Reference(_) | Self::Scalar(_) | Self::Struct(_) => None,
        }
    }

    /// The named type resolution continues with, if any
    ///
    /// Scalars and collections have no continuation of their own (collections
    /// continue through their element instead).
    #[must_use]
    pub const fn named_type(&self) -> Option<&TypeName> {
        match self {
            Self::Reference(name) | Self::Struct(name) => Some(name),
            Self::Array(_) | Self::List(_) | Self::Scalar(_) => None,
        }
    }

    /// The referenced object type, when this field is a reference terminal
    ///
    /// This is the entry point the discovery engine consumes: only reference
    /// fields are pickable.
    #[must_use]
    pub const fn reference_target(&self) -> Option<&TypeName> {
        match self {
            Self::Reference(name) => Some(name),
            Self::Array(_) | Self::List(_) | Self::Scalar(_) | Self::Struct(_) => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Array(element) => write!(f, "[{element}]"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Reference(name) => write!(f, "ref<{name}>"),
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Struct(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_only_on_collections() {
        let list = FieldType::list(FieldType::Reference(TypeName::from("Enemy")));
        assert!(list.is_collection());
        assert_eq!(
            list.element_type(),
            Some(&FieldType::Reference(TypeName::from("Enemy")))
        );

        let scalar = FieldType::Scalar(ScalarKind::Int);
        assert!(!scalar.is_collection());
        assert_eq!(scalar.element_type(), None);
    }

    #[test]
    fn test_reference_target_rejects_non_references() {
        let reference = FieldType::Reference(TypeName::from("Enemy"));
        assert_eq!(
            reference.reference_target(),
            Some(&TypeName::from("Enemy"))
        );
        assert_eq!(FieldType::Struct(TypeName::from("Stats")).reference_target(), None);
    }

    #[test]
    fn test_display_nests() {
        let field = FieldType::array(FieldType::list(FieldType::Scalar(ScalarKind::Float)));
        assert_eq!(field.to_string(), "[list<float>]");
    }
}
