//! Container-asset component provider
//!
//! Specializes the store walk to container (prefab-like) assets: each
//! container's root node is loaded and checked for an attached component of
//! the requested type, yielding at most one candidate per container. Only
//! the root node is inspected, never the container's descendants.

use tracing::warn;

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::registry::TypeName;
use crate::world::{AssetStore, SceneGraph};

/// Yields the requested component off each container asset that carries one
pub struct PrefabComponents<'a> {
    store:            &'a dyn AssetStore,
    scene_graph:      &'a dyn SceneGraph,
    component_type:   TypeName,
    include_external: bool,
}

impl<'a> PrefabComponents<'a> {
    /// Provider over container assets carrying a `component_type` component
    #[must_use]
    pub const fn new(
        store: &'a dyn AssetStore,
        scene_graph: &'a dyn SceneGraph,
        component_type: TypeName,
        include_external: bool,
    ) -> Self {
        Self {
            store,
            scene_graph,
            component_type,
            include_external,
        }
    }
}

impl ObjectProvider for PrefabComponents<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut keys = self.store.container_assets().into_iter();
        Box::new(std::iter::from_fn(move || {
            loop {
                let key = keys.next()?;
                let Some(path) = self.store.asset_path(&key) else {
                    warn!(%key, "store returned a key with no path, skipping");
                    continue;
                };
                if !self.include_external && !self.store.is_project_path(&path) {
                    continue;
                }
                let Some(root) = self.store.load_container(&path) else {
                    continue;
                };
                let component = self
                    .scene_graph
                    .components_on(root, Some(&self.component_type), true)
                    .into_iter()
                    .next();
                if let Some(component) = component {
                    return Some(Candidate::asset(component));
                }
            }
        }))
    }
}
