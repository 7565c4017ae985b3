//! Whole-scene node provider
//!
//! Depth-first pre-order over every root node and its full descendant chain,
//! so a node's entire subtree is listed before its next sibling. The stack is
//! explicit; hierarchy depth never grows the call stack.

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::world::{SceneGraph, SceneId};

/// Yields every node of a scene in depth-first pre-order
pub struct SceneObjects<'a> {
    scene_graph: &'a dyn SceneGraph,
    scene:       SceneId,
}

impl<'a> SceneObjects<'a> {
    /// Provider over every node of `scene`
    #[must_use]
    pub const fn new(scene_graph: &'a dyn SceneGraph, scene: SceneId) -> Self {
        Self { scene_graph, scene }
    }
}

impl ObjectProvider for SceneObjects<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut stack = self.scene_graph.root_nodes(self.scene);
        stack.reverse();
        Box::new(std::iter::from_fn(move || {
            let node = stack.pop()?;
            // reversed so the first child is popped next
            stack.extend(self.scene_graph.children(node).into_iter().rev());
            Some(Candidate::scene(node))
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::candidate::SourceKind;
    use crate::registry::{ObjectCategory, TypeInfo, TypeRegistry};
    use crate::world::ObjectId;
    use crate::world::memory::MemoryWorld;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeInfo::new("Object", ObjectCategory::AnyObject));
        registry.register(TypeInfo::new("Node", ObjectCategory::Node).with_base("Object"));
        registry
    }

    #[test]
    fn test_depth_first_pre_order() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let r1 = world.spawn_root(scene, "Node");
        let a = world.spawn_child(r1, "Node");
        let b = world.spawn_child(r1, "Node");
        let c = world.spawn_child(b, "Node");
        let r2 = world.spawn_root(scene, "Node");

        let provider = SceneObjects::new(&world, scene);
        let visited: Vec<ObjectId> = provider
            .lookup()
            .map(|candidate| candidate.object)
            .collect();

        // B's subtree comes before the next root
        assert_eq!(visited, vec![r1, a, b, c, r2]);
    }

    #[test]
    fn test_tagged_scene_graph() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        world.spawn_root(scene, "Node");

        let provider = SceneObjects::new(&world, scene);
        assert!(provider
            .lookup()
            .all(|candidate| candidate.source == SourceKind::SceneGraph));
    }

    #[test]
    fn test_each_lookup_is_fresh() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        world.spawn_root(scene, "Node");
        world.spawn_root(scene, "Node");

        let provider = SceneObjects::new(&world, scene);
        let first: Vec<_> = provider.lookup().collect();
        let second: Vec<_> = provider.lookup().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_empty_scene_yields_nothing() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();

        let provider = SceneObjects::new(&world, scene);
        assert_eq!(provider.lookup().count(), 0);
    }
}
