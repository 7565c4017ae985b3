//! Lazy candidate discovery providers
//!
//! Each provider turns one source (the asset store, a whole scene, a rooted
//! subtree) into a sequence of [`Candidate`]s. The variant set is closed:
//! policy composes these six, plus [`ProviderUnion`], and nothing else.
//! Sequences are pull-driven; a caller that stops consuming stops the search,
//! and nothing is computed ahead of the consumer.

mod asset_objects;
mod child_components;
mod child_objects;
mod prefab_components;
mod scene_components;
mod scene_objects;
mod union;

pub use asset_objects::AssetObjects;
pub use child_components::ChildComponents;
pub use child_objects::ChildObjects;
pub use prefab_components::PrefabComponents;
pub use scene_components::SceneComponents;
pub use scene_objects::SceneObjects;
pub use union::ProviderUnion;

use crate::candidate::Candidate;

/// A source of candidate objects
pub trait ObjectProvider {
    /// Produce a fresh, finite, single-pass candidate sequence
    ///
    /// Each call starts the walk over. The sequence is lazy: one bounded unit
    /// of host work per yielded element, nothing buffered ahead of the pull.
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_>;
}
