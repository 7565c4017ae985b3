//! Whole-scene component provider
//!
//! Visits nodes in the same depth-first pre-order as the node provider, but
//! yields the matching components attached to each visited node instead of
//! the node itself. A `None` type filter yields every attached component.
//! Inactive components are included; a picker that hid them could never
//! fill a field with a currently disabled component.

use std::collections::VecDeque;

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::registry::TypeName;
use crate::world::{SceneGraph, SceneId};

/// Yields matching components across a whole scene, owner-node DFS order
pub struct SceneComponents<'a> {
    scene_graph:    &'a dyn SceneGraph,
    scene:          SceneId,
    component_type: Option<TypeName>,
}

impl<'a> SceneComponents<'a> {
    /// Provider over components attached anywhere in `scene`
    ///
    /// `component_type` of `None` places no type restriction.
    #[must_use]
    pub const fn new(
        scene_graph: &'a dyn SceneGraph,
        scene: SceneId,
        component_type: Option<TypeName>,
    ) -> Self {
        Self {
            scene_graph,
            scene,
            component_type,
        }
    }
}

impl ObjectProvider for SceneComponents<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut stack = self.scene_graph.root_nodes(self.scene);
        stack.reverse();
        let mut pending: VecDeque<Candidate> = VecDeque::new();
        Box::new(std::iter::from_fn(move || {
            loop {
                if let Some(candidate) = pending.pop_front() {
                    return Some(candidate);
                }
                let node = stack.pop()?;
                stack.extend(self.scene_graph.children(node).into_iter().rev());
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
