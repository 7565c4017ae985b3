//! Candidate records produced by discovery providers

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::world::ObjectId;

/// Where a provider found a candidate
///
/// Provider-declared, never re-derived per candidate: the same logical object
/// may surface from an asset provider and a scene provider inside one union,
/// each occurrence tagged with its own source, and neither hides the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// Found through the content store
    Asset,
    /// Found by walking live scene objects
    SceneGraph,
    /// Host-defined extension source
    Other,
}

/// One pickable object with its provider-declared source
///
/// Ephemeral: created fresh per lookup, discarded after consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate object
    pub object: ObjectId,
    /// Where the provider found it
    pub source: SourceKind,
}

impl Candidate {
    /// A candidate found through the content store
    #[must_use]
    pub const fn asset(object: ObjectId) -> Self {
        Self {
            object,
            source: SourceKind::Asset,
        }
    }

    /// A candidate found among live scene objects
    #[must_use]
    pub const fn scene(object: ObjectId) -> Self {
        Self {
            object,
            source: SourceKind::SceneGraph,
        }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.object, self.source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_part_of_identity() {
        let object = ObjectId::new(7);
        // the same object from two sources is two distinct records
        assert_ne!(Candidate::asset(object), Candidate::scene(object));
        assert_eq!(Candidate::asset(object), Candidate::asset(object));
    }

    #[test]
    fn test_display() {
        assert_eq!(Candidate::scene(ObjectId::new(3)).to_string(), "#3 (scene_graph)");
    }
}
