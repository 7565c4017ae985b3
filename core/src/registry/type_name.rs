//! A newtype wrapper for host type names used throughout the system
//!
//! Declared types, runtime types, and registry keys are all identified by the
//! host's fully-qualified type name strings. Wrapping them keeps the maps
//! type-safe and gives display helpers one home.

use serde::{Deserialize, Serialize};

/// A newtype wrapper for fully-qualified host type names
///
/// Used as the key of the [type registry](crate::registry::TypeRegistry) and
/// as the identity carried by every declared or runtime type in the picker
/// core. The string contents are host-defined; the core never parses them
/// beyond the display helpers below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name (last `::` or `.` separated segment)
    ///
    /// Hosts qualify type names differently (`game::items::Sword`,
    /// `Game.Items.Sword`); pickers label candidates with just the tail.
    #[must_use]
    pub fn short_name(&self) -> &str {
        let tail = self.0.rsplit("::").next().unwrap_or(&self.0);
        tail.rsplit('.').next().unwrap_or(tail)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self {
        type_name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
