//! Rooted-subtree component provider
//!
//! The breadth-first subtree walk, yielding matching attached components of
//! each visited node instead of the node itself. Inactive components are
//! included.

use std::collections::VecDeque;

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::registry::TypeName;
use crate::world::{ObjectId, SceneGraph};

/// Yields matching components below an anchor node, owner-node BFS order
pub struct ChildComponents<'a> {
    scene_graph:    &'a dyn SceneGraph,
    anchor:         ObjectId,
    component_type: Option<TypeName>,
}

impl<'a> ChildComponents<'a> {
    /// Provider over components attached on `anchor` or any descendant
    ///
    /// `component_type` of `None` places no type restriction.
    #[must_use]
    pub const fn new(
        scene_graph: &'a dyn SceneGraph,
        anchor: ObjectId,
        component_type: Option<TypeName>,
    ) -> Self {
        Self {
            scene_graph,
            anchor,
            component_type,
        }
    }

    /// Root-anchored variant: re-anchors to the topmost ancestor of `node`
    /// before walking
    #[must_use]
    pub fn from_root_of(
        scene_graph: &'a dyn SceneGraph,
        node: ObjectId,
        component_type: Option<TypeName>,
    ) -> Self {
        let anchor = scene_graph.topmost_ancestor(node);
        Self {
            scene_graph,
            anchor,
            component_type,
        }
    }
}

impl ObjectProvider for ChildComponents<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut queue = VecDeque::from([self.anchor]);
        let mut pending: VecDeque<Candidate> = VecDeque::new();
        Box::new(std::iter::from_fn(move || {
            loop {
                if let Some(candidate) = pending.pop_front() {
                    return Some(candidate);
                }
                let node = queue.pop_front()?;
                queue.extend(self.scene_graph.children(node));
                pending.extend(
                    self.scene_graph
                        .components_on(node, self.component_type.as_ref(), true)
                        .into_iter()
                        .map(Candidate::scene),
                );
            }
        }))
    }
}
