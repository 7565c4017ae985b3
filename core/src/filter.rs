//! Candidate acceptance
//!
//! One filter instance captures everything a field narrows candidates by:
//! the declared reference type, an optional additional narrowing type, and
//! an optional caller predicate. Component-typed fields additionally coerce
//! container nodes to their attached component before judging. Filtering
//! never errors; anything unresolvable is a rejection.

use crate::candidate::Candidate;
use crate::config::CandidateTest;
use crate::registry::{TypeName, TypeRegistry};
use crate::world::{ObjectId, SceneGraph};

/// Composable acceptance test for one reference field
pub struct CandidateFilter<'a> {
    scene_graph: &'a dyn SceneGraph,
    registry:    &'a TypeRegistry,
    declared:    TypeName,
    additional:  Option<TypeName>,
    custom:      Option<CandidateTest>,
}

impl<'a> CandidateFilter<'a> {
    /// Filter for a field declared as `declared`
    ///
    /// `additional` narrows further when present (the candidate must be
    /// assignable to both); `custom` is the caller's own predicate, invoked
    /// last and on the effective (possibly substituted) candidate.
    #[must_use]
    pub const fn new(
        scene_graph: &'a dyn SceneGraph,
        registry: &'a TypeRegistry,
        declared: TypeName,
        additional: Option<TypeName>,
        custom: Option<CandidateTest>,
    ) -> Self {
        Self {
            scene_graph,
            registry,
            declared,
            additional,
            custom,
        }
    }

    /// The candidate actually judged and, on acceptance, assigned
    ///
    /// For a component-typed field, a node candidate stands in for its first
    /// attached component of the declared type; `None` when it has no such
    /// component. Every other candidate stands for itself. The substituted
    /// record keeps the incoming source.
    #[must_use]
    pub fn effective(&self, candidate: Candidate) -> Option<Candidate> {
        if !self.registry.is_component(&self.declared) {
            return Some(candidate);
        }
        let runtime = self.scene_graph.runtime_type(candidate.object)?;
        if self.registry.is_node(&runtime) {
            let substitute = self
                .scene_graph
                .components_on(candidate.object, Some(&self.declared), true)
                .into_iter()
                .next()?;
            return Some(Candidate {
                object: substitute,
                source: candidate.source,
            });
        }
        Some(candidate)
    }

    /// Whether the candidate (after substitution) passes every narrowing
    ///
    /// Conditions run short-circuit, cheapest first: declared-type
    /// assignability, additional-type assignability, then the caller
    /// predicate.
    #[must_use]
    pub fn accept(&self, candidate: Candidate) -> bool {
        self.effective(candidate)
            .is_some_and(|effective| self.passes(effective))
    }

    fn passes(&self, candidate: Candidate) -> bool {
        let Some(runtime) = self.scene_graph.runtime_type(candidate.object) else {
            return false;
        };
        self.registry.is_assignable(&runtime, &self.declared)
            && self
                .additional
                .as_ref()
                .is_none_or(|extra| self.registry.is_assignable(&runtime, extra))
            && self.custom.as_ref().is_none_or(|test| test(candidate))
    }
}

/// Build a candidate from a bare object, deriving its source
///
/// Objects living in a scene classify as scene-graph finds, everything else
/// (stored assets, container contents) as assets. Providers never need this;
/// it covers objects arriving from outside any provider, such as a
/// drag-and-drop payload.
#[must_use]
pub fn classify(scene_graph: &dyn SceneGraph, object: ObjectId) -> Candidate {
    if scene_graph.scene_of(object).is_some() {
        Candidate::scene(object)
    } else {
        Candidate::asset(object)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::candidate::SourceKind;
    use crate::registry::{ObjectCategory, TypeInfo};
    use crate::world::memory::MemoryWorld;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeInfo::new("Object", ObjectCategory::AnyObject));
        registry.register(TypeInfo::new("Node", ObjectCategory::Node).with_base("Object"));
        registry.register(TypeInfo::new("Component", ObjectCategory::Component).with_base("Object"));
        registry.register(TypeInfo::new("Weapon", ObjectCategory::Component).with_base("Component"));
        registry.register(TypeInfo::new("Sword", ObjectCategory::Component).with_base("Weapon"));
        registry.register(TypeInfo::new("Armor", ObjectCategory::Component).with_base("Component"));
        registry.register(TypeInfo::new("Texture", ObjectCategory::Asset).with_base("Object"));
        registry
    }

    fn weapon_filter(world: &MemoryWorld) -> CandidateFilter<'_> {
        CandidateFilter::new(world, world.registry(), "Weapon".into(), None, None)
    }

    #[test]
    fn test_node_substituted_by_attached_component() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let sword = world.attach(node, "Sword");

        let filter = weapon_filter(&world);
        let incoming = Candidate::scene(node);

        assert!(filter.accept(incoming));
        let effective = filter.effective(incoming).unwrap();
        assert_eq!(effective.object, sword);
        assert_eq!(effective.source, SourceKind::SceneGraph);
    }

    #[test]
    fn test_node_without_matching_component_rejected() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        world.attach(node, "Armor");

        let filter = weapon_filter(&world);
        assert!(!filter.accept(Candidate::scene(node)));
        assert!(filter.effective(Candidate::scene(node)).is_none());
    }

    #[test]
    fn test_direct_components_judged_by_assignability() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let sword = world.attach(node, "Sword");
        let armor = world.attach(node, "Armor");

        let filter = weapon_filter(&world);
        assert!(filter.accept(Candidate::scene(sword)));
        assert!(!filter.accept(Candidate::scene(armor)));
    }

    #[test]
    fn test_additional_type_narrows() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let sword = world.attach(node, "Sword");
        let armor = world.attach(node, "Armor");

        let filter = CandidateFilter::new(
            &world,
            world.registry(),
            "Component".into(),
            Some("Weapon".into()),
            None,
        );

        // both are components; only the sword also narrows to Weapon
        assert!(filter.accept(Candidate::scene(sword)));
        assert!(!filter.accept(Candidate::scene(armor)));
    }

    #[test]
    fn test_custom_predicate_sees_the_substituted_candidate() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let sword = world.attach(node, "Sword");

        let expected = sword;
        let test: CandidateTest = Arc::new(move |candidate| candidate.object == expected);
        let filter = CandidateFilter::new(
            &world,
            world.registry(),
            "Weapon".into(),
            None,
            Some(test),
        );

        // the predicate matches the component, so the node must pass too
        assert!(filter.accept(Candidate::scene(node)));
    }

    #[test]
    fn test_custom_predicate_can_reject() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let sword = world.attach(node, "Sword");

        let test: CandidateTest = Arc::new(|_| false);
        let filter = CandidateFilter::new(
            &world,
            world.registry(),
            "Weapon".into(),
            None,
            Some(test),
        );
        assert!(!filter.accept(Candidate::scene(sword)));
    }

    #[test]
    fn test_unknown_object_rejected() {
        let world = MemoryWorld::new(registry());
        let filter = weapon_filter(&world);
        assert!(!filter.accept(Candidate::scene(ObjectId::new(404))));
    }

    #[test]
    fn test_classify_by_scene_membership() {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let on_node = world.attach(node, "Sword");
        let (_, texture) = world.add_asset("assets/wood.png", "Texture");
        let (_, container) = world.add_container_asset("assets/kit.prefab", "Node");
        let on_container = world.attach(container, "Sword");

        assert_eq!(classify(&world, node).source, SourceKind::SceneGraph);
        assert_eq!(classify(&world, on_node).source, SourceKind::SceneGraph);
        assert_eq!(classify(&world, texture).source, SourceKind::Asset);
        assert_eq!(classify(&world, on_container).source, SourceKind::Asset);
    }
}
