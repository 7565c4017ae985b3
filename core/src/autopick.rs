//! One-shot candidate resolution
//!
//! Auto-picking fills a field with the first acceptable match of a
//! deterministic scan instead of opening a picker. Every strategy searches
//! components, scans from the owner's node, and returns the first candidate
//! the filter accepts. Finding nothing is a data-dependent failure; being
//! invoked with a mode that names no strategy is a programming error and
//! fails loudly.

use crate::candidate::Candidate;
use crate::config::AutoPickMode;
use crate::error::{Error, Result};
use crate::filter::CandidateFilter;
use crate::provider::{ChildComponents, ObjectProvider, SceneComponents};
use crate::registry::TypeName;
use crate::world::{ObjectId, SceneGraph};

/// Resolve a single candidate of `target` for the owner object `from`
///
/// `FindInSelf` inspects the owner's node only; `FindInChildren` scans the
/// node's subtree nearest-first; `FindInParent` scans the node and then its
/// ancestors upward; `FindGlobally` scans the owner's whole scene. An owner
/// that resolves to no node, or a scan with no accepted match, is
/// [`Error::NoAutoPickCandidate`]. `None` and an unresolved `Default` have
/// no strategy and are [`Error::UnsupportedAutoPickMode`].
pub fn auto_pick(
    scene_graph: &dyn SceneGraph,
    mode: AutoPickMode,
    from: ObjectId,
    target: &TypeName,
    filter: &CandidateFilter<'_>,
) -> Result<Candidate> {
    let found = match mode {
        AutoPickMode::FindInSelf => pick_in_self(scene_graph, from, target, filter),
        AutoPickMode::FindInChildren => pick_in_children(scene_graph, from, target, filter),
        AutoPickMode::FindInParent => pick_in_parents(scene_graph, from, target, filter),
        AutoPickMode::FindGlobally => pick_globally(scene_graph, from, target, filter),
        AutoPickMode::None | AutoPickMode::Default => {
            return Err(Error::UnsupportedAutoPickMode(mode).into());
        }
    };

    found.ok_or_else(|| {
        Error::NoAutoPickCandidate {
            mode,
            target: target.clone(),
        }
        .into()
    })
}

fn pick_in_self(
    scene_graph: &dyn SceneGraph,
    from: ObjectId,
    target: &TypeName,
    filter: &CandidateFilter<'_>,
) -> Option<Candidate> {
    let node = scene_graph.node_of(from)?;
    scene_graph
        .components_on(node, Some(target), true)
        .into_iter()
        .map(Candidate::scene)
        .find(|candidate| filter.accept(*candidate))
}

fn pick_in_children(
    scene_graph: &dyn SceneGraph,
    from: ObjectId,
    target: &TypeName,
    filter: &CandidateFilter<'_>,
) -> Option<Candidate> {
    let node = scene_graph.node_of(from)?;
    ChildComponents::new(scene_graph, node, Some(target.clone()))
        .lookup()
        .find(|candidate| filter.accept(*candidate))
}

fn pick_in_parents(
    scene_graph: &dyn SceneGraph,
    from: ObjectId,
    target: &TypeName,
    filter: &CandidateFilter<'_>,
) -> Option<Candidate> {
    let mut current = scene_graph.node_of(from);
    while let Some(node) = current {
        let found = scene_graph
            .components_on(node, Some(target), true)
            .into_iter()
            .map(Candidate::scene)
            .find(|candidate| filter.accept(*candidate));
        if found.is_some() {
            return found;
        }
        current = scene_graph.parent(node);
    }
    None
}

fn pick_globally(
    scene_graph: &dyn SceneGraph,
    from: ObjectId,
    target: &TypeName,
    filter: &CandidateFilter<'_>,
) -> Option<Candidate> {
    let node = scene_graph.node_of(from)?;
    let scene = scene_graph.scene_of(node)?;
    SceneComponents::new(scene_graph, scene, Some(target.clone()))
        .lookup()
        .find(|candidate| filter.accept(*candidate))
}
