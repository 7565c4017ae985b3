//! Rooted-subtree node provider
//!
//! Breadth-first from the anchor node inclusive, so nearer neighbors list
//! before deeper descendants. The breadth-first order is deliberate and
//! distinguishes this provider from the depth-first whole-scene walk.

use std::collections::VecDeque;

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::world::{ObjectId, SceneGraph};

/// Yields a node and all its descendants in breadth-first order
pub struct ChildObjects<'a> {
    scene_graph: &'a dyn SceneGraph,
    anchor:      ObjectId,
}

impl<'a> ChildObjects<'a> {
    /// Provider over `anchor` and its descendants
    #[must_use]
    pub const fn new(scene_graph: &'a dyn SceneGraph, anchor: ObjectId) -> Self {
        Self {
            scene_graph,
            anchor,
        }
    }

    /// Provider over the topmost ancestor of `node` and its descendants
    ///
    /// Covers the root-anchored variant: the walk is re-anchored before it
    /// starts, then proceeds exactly as [`ChildObjects::new`].
    #[must_use]
    pub fn from_root_of(scene_graph: &'a dyn SceneGraph, node: ObjectId) -> Self {
        let anchor = scene_graph.topmost_ancestor(node);
        Self {
            scene_graph,
            anchor,
        }
    }
}

impl ObjectProvider for ChildObjects<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut queue = VecDeque::from([self.anchor]);
        Box::new(std::iter::from_fn(move || {
            let node = queue.pop_front()?;
            queue.extend(self.scene_graph.children(node));
            Some(Candidate::scene(node))
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::{ObjectCategory, TypeInfo, TypeRegistry};
    use crate::world::memory::MemoryWorld;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeInfo::new("Object", ObjectCategory::AnyObject));
        registry.register(TypeInfo::new("Node", ObjectCategory::Node).with_base("Object"));
        registry
    }

    #[test]
    fn test_breadth_first_from_anchor_inclusive() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let r1 = world.spawn_root(scene, "Node");
        let a = world.spawn_child(r1, "Node");
        let b = world.spawn_child(r1, "Node");
        let c = world.spawn_child(b, "Node");
        world.spawn_root(scene, "Node");

        let provider = ChildObjects::new(&world, r1);
        let visited: Vec<_> = provider
            .lookup()
            .map(|candidate| candidate.object)
            .collect();

        // the second root never appears; the walk stays inside the subtree
        assert_eq!(visited, vec![r1, a, b, c]);
    }

    #[test]
    fn test_parent_before_any_grandchild() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let root = world.spawn_root(scene, "Node");
        let first = world.spawn_child(root, "Node");
        let grandchild = world.spawn_child(first, "Node");
        let second = world.spawn_child(root, "Node");

        let provider = ChildObjects::new(&world, root);
        let visited: Vec<_> = provider
            .lookup()
            .map(|candidate| candidate.object)
            .collect();

        // depth-first would put the grandchild before the second child
        assert_eq!(visited, vec![root, first, second, grandchild]);
    }

    #[test]
    fn test_root_anchored_walk_covers_the_whole_tree() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let r1 = world.spawn_root(scene, "Node");
        let a = world.spawn_child(r1, "Node");
        let b = world.spawn_child(r1, "Node");
        let c = world.spawn_child(b, "Node");

        // anchored at a leaf, re-anchors to R1
        let provider = ChildObjects::from_root_of(&world, c);
        let visited: Vec<_> = provider
            .lookup()
            .map(|candidate| candidate.object)
            .collect();
        assert_eq!(visited, vec![r1, a, b, c]);
    }

    #[test]
    fn test_leaf_anchor_yields_only_itself() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let root = world.spawn_root(scene, "Node");
        let leaf = world.spawn_child(root, "Node");

        let provider = ChildObjects::new(&world, leaf);
        let visited: Vec<_> = provider
            .lookup()
            .map(|candidate| candidate.object)
            .collect();
        assert_eq!(visited, vec![leaf]);
    }
}
