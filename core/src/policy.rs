//! Provider selection policy
//!
//! Translates (requested sources, declared type, owning object) into the
//! concrete provider union. The declared type's category decides which
//! providers are even eligible, the source mask decides which eligible ones
//! run, and scene-side sources additionally require the owner to resolve to
//! a node. Exactly one scene-side source contributes per request: Scene wins
//! over RootChildren, RootChildren over Children.

use tracing::debug;

use crate::config::SourceMask;
use crate::provider::{
    AssetObjects, ChildComponents, ChildObjects, ObjectProvider, PrefabComponents, ProviderUnion,
    SceneComponents, SceneObjects,
};
use crate::registry::{ObjectCategory, TypeName, TypeRegistry};
use crate::world::{AssetStore, ObjectId, SceneGraph, SceneId};

/// Boxed provider list under construction
type Providers<'a> = Vec<Box<dyn ObjectProvider + 'a>>;

/// Composes the provider set for one picking request
pub struct ProviderResolver<'a> {
    store:            &'a dyn AssetStore,
    scene_graph:      &'a dyn SceneGraph,
    registry:         &'a TypeRegistry,
    include_external: bool,
}

impl<'a> ProviderResolver<'a> {
    /// Policy over the given store, scene graph, and registry
    ///
    /// `include_external` is handed through to asset-side providers.
    #[must_use]
    pub const fn new(
        store: &'a dyn AssetStore,
        scene_graph: &'a dyn SceneGraph,
        registry: &'a TypeRegistry,
        include_external: bool,
    ) -> Self {
        Self {
            store,
            scene_graph,
            registry,
            include_external,
        }
    }

    /// Select and compose providers for a declared type owned by `owner`
    ///
    /// A declared type that cannot live in a scene never triggers scene-side
    /// providers, whatever the mask asks for. An empty selection is an empty
    /// union, never an error. The union borrows the store and scene graph,
    /// not the resolver.
    #[must_use]
    pub fn resolve(
        &self,
        mask: SourceMask,
        declared: &TypeName,
        owner: ObjectId,
    ) -> ProviderUnion<'a> {
        let mut providers: Providers<'a> = Vec::new();

        if mask.contains(SourceMask::ASSETS) {
            if self.registry.is_component(declared) {
                providers.push(Box::new(PrefabComponents::new(
                    self.store,
                    self.scene_graph,
                    declared.clone(),
                    self.include_external,
                )));
            } else {
                providers.push(Box::new(AssetObjects::new(
                    self.store,
                    declared.clone(),
                    None,
                    self.include_external,
                )));
            }
        }

        let scene_eligible = self
            .registry
            .category_of(declared)
            .is_some_and(ObjectCategory::is_scene_object);
        if scene_eligible && let Some(node) = self.scene_graph.node_of(owner) {
            if mask.contains(SourceMask::SCENE) {
                if let Some(scene) = self.scene_graph.scene_of(node) {
                    self.push_scene_providers(&mut providers, scene, declared);
                } else {
                    debug!(%owner, "owner node belongs to no scene, scene source skipped");
                }
            } else if mask.contains(SourceMask::ROOT_CHILDREN) {
                let anchor = self.scene_graph.topmost_ancestor(node);
                self.push_subtree_providers(&mut providers, anchor, declared);
            } else if mask.contains(SourceMask::CHILDREN) {
                self.push_subtree_providers(&mut providers, node, declared);
            }
        }

        debug!(%declared, ?mask, providers = providers.len(), "provider set composed");
        ProviderUnion::new(providers)
    }

    /// Three-way category split over a whole scene
    fn push_scene_providers(
        &self,
        providers: &mut Providers<'a>,
        scene: SceneId,
        declared: &TypeName,
    ) {
        if self.registry.is_component(declared) {
            providers.push(Box::new(SceneComponents::new(
                self.scene_graph,
                scene,
                Some(declared.clone()),
            )));
        } else if self.registry.is_any_object(declared) {
            // component-like results first, then the nodes themselves
            providers.push(Box::new(SceneComponents::new(self.scene_graph, scene, None)));
            providers.push(Box::new(SceneObjects::new(self.scene_graph, scene)));
        } else {
            providers.push(Box::new(SceneObjects::new(self.scene_graph, scene)));
        }
    }

    /// Three-way category split over a rooted subtree
    fn push_subtree_providers(
        &self,
        providers: &mut Providers<'a>,
        anchor: ObjectId,
        declared: &TypeName,
    ) {
        if self.registry.is_component(declared) {
            providers.push(Box::new(ChildComponents::new(
                self.scene_graph,
                anchor,
                Some(declared.clone()),
            )));
        } else if self.registry.is_any_object(declared) {
            providers.push(Box::new(ChildComponents::new(self.scene_graph, anchor, None)));
            providers.push(Box::new(ChildObjects::new(self.scene_graph, anchor)));
        } else {
            providers.push(Box::new(ChildObjects::new(self.scene_graph, anchor)));
        }
    }
}
