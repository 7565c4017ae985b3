//! Declared-type resolution along a property path
//!
//! The walk tracks two things per step: the declared shape reached so far and
//! the live instance backing it, if any. Declared types come from the
//! registry; a live collection element, when fetchable, replaces the static
//! element type with the element's runtime type for the remainder of the
//! walk. Losing the instance mid-walk (empty slot, out-of-range index,
//! uninspectable value) silently continues on declared types alone.

use super::{PropertyPath, Segment};
use crate::error::{Error, Result};
use crate::registry::{FieldType, TypeName, TypeRegistry};
use crate::world::{InstanceRef, InstanceView, ObjectId, SceneGraph};

/// Walks property paths against a registry and a live-value view
pub struct PathResolver<'a> {
    registry:  &'a TypeRegistry,
    instances: &'a dyn InstanceView,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over the given registry and instance view
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry, instances: &'a dyn InstanceView) -> Self {
        Self {
            registry,
            instances,
        }
    }

    /// Resolve the declared type at `path`, starting from a root of
    /// `root_type` optionally backed by a live instance
    ///
    /// Exactly one declared type comes back, or an explicit failure; never an
    /// ambiguous result. Failures are [`Error::FieldNotFound`],
    /// [`Error::TypeNotRegistered`], or [`Error::UnresolvedCollectionElement`]
    /// (an index step on a non-collection declared type).
    pub fn resolve(
        &self,
        root_type: &TypeName,
        root_instance: Option<InstanceRef>,
        path: &PropertyPath,
    ) -> Result<FieldType> {
        // the root is walkable like a struct-typed field
        let mut declared = FieldType::Struct(root_type.clone());
        let mut instance = root_instance;

        for segment in path.segments() {
            match segment {
                Segment::Field(name) => {
                    let Some(owner) = declared.named_type() else {
                        return Err(
                            Error::field_not_found(declared.to_string(), name.as_str()).into()
                        );
                    };
                    let next = self.registry.field_type(owner, name)?;
                    instance = instance.and_then(|live| self.instances.field(live, name));
                    declared = next;
                }
                Segment::Element(index) => {
                    let Some(element) = declared.element_type() else {
                        return Err(Error::UnresolvedCollectionElement {
                            declared: declared.clone(),
                            index:    *index,
                        }
                        .into());
                    };
                    let mut next = element.clone();
                    let live = instance.and_then(|live| self.instances.element(live, *index));
                    if let Some(live) = live
                        && let Some(runtime) = self.instances.instance_type(live)
                    {
                        next = refine(next, runtime);
                    }
                    instance = live;
                    declared = next;
                }
            }
        }

        Ok(declared)
    }
}

/// Swap a declared element shape's named type for the element's runtime type
///
/// Shapes without a named continuation (scalars, nested collections) keep
/// their declared form.
fn refine(declared: FieldType, runtime: TypeName) -> FieldType {
    match declared {
        FieldType::Struct(_) => FieldType::Struct(runtime),
        FieldType::Reference(_) => FieldType::Reference(runtime),
        FieldType::Array(_) | FieldType::List(_) | FieldType::Scalar(_) => declared,
    }
}

/// Resolve the declared type of the field at `path` on a live store object
///
/// The object's runtime type seeds the walk and its instance tree, if the
/// host exposes one, drives runtime element refinement.
pub fn resolve_path<H>(
    host: &H,
    registry: &TypeRegistry,
    root: ObjectId,
    path: &str,
) -> Result<FieldType>
where
    H: SceneGraph + InstanceView,
{
    let parsed = PropertyPath::parse(path)?;
    let root_type = host
        .runtime_type(root)
        .ok_or(Error::UnknownObject(root))?;
    let resolver = PathResolver::new(registry, host);
    resolver.resolve(&root_type, host.instance_of(root), &parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::{ObjectCategory, ScalarKind, TypeInfo};
    use crate::world::memory::{MemoryWorld, ValueSpec};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeInfo::new("Object", ObjectCategory::AnyObject));
        registry.register(TypeInfo::new("Node", ObjectCategory::Node).with_base("Object"));
        registry.register(TypeInfo::new("Component", ObjectCategory::Component).with_base("Object"));
        registry.register(
            TypeInfo::new("Holder", ObjectCategory::Component)
                .with_base("Component")
                .with_field("items", FieldType::list(FieldType::Struct("SlotBase".into())))
                .with_field("stats", FieldType::Struct("Stats".into()))
                .with_field("tags", FieldType::array(FieldType::Scalar(ScalarKind::Text))),
        );
        registry.register(
            TypeInfo::new("Stats", ObjectCategory::Data)
                .with_field("strength", FieldType::Scalar(ScalarKind::Int)),
        );
        registry.register(
            TypeInfo::new("SlotBase", ObjectCategory::Data)
                .with_field("target", FieldType::Reference("Object".into())),
        );
        registry.register(
            TypeInfo::new("DerivedSlot", ObjectCategory::Data)
                .with_base("SlotBase")
                .with_field("target", FieldType::Reference("Derived2".into())),
        );
        registry.register(
            TypeInfo::new("Derived2", ObjectCategory::Component).with_base("Component"),
        );
        registry.register(
            TypeInfo::new("Weapon", ObjectCategory::Component)
                .with_base("Component")
                .with_field("damage", FieldType::Scalar(ScalarKind::Float)),
        );
        registry.register(TypeInfo::new("Sword", ObjectCategory::Component).with_base("Weapon"));
        registry
    }

    fn world_with_holder() -> (MemoryWorld, ObjectId) {
        let mut world = MemoryWorld::new(registry());
        let scene = world.add_scene();
        let node = world.spawn_root(scene, "Node");
        let holder = world.attach(node, "Holder");
        (world, holder)
    }

    #[test]
    fn test_inherited_field_resolves_through_base_chain() {
        let (world, _) = world_with_holder();
        let resolver = PathResolver::new(world.registry(), &world);
        let path = PropertyPath::parse("damage").unwrap();

        // declared on Weapon, resolved from Sword
        let resolved = resolver
            .resolve(&TypeName::from("Sword"), None, &path)
            .unwrap();
        assert_eq!(resolved, FieldType::Scalar(ScalarKind::Float));
    }

    #[test]
    fn test_nested_struct_walk() {
        let (world, holder) = world_with_holder();
        let registry = world.registry().clone();

        let resolved = resolve_path(&world, &registry, holder, "stats.strength").unwrap();
        assert_eq!(resolved, FieldType::Scalar(ScalarKind::Int));
    }

    #[test]
    fn test_static_element_type_without_instance() {
        let (world, holder) = world_with_holder();
        let registry = world.registry().clone();

        // no instance anywhere: the declared element type wins
        let resolved = resolve_path(&world, &registry, holder, "items.Array.data[1].target").unwrap();
        assert_eq!(resolved, FieldType::Reference(TypeName::from("Object")));

        let terminal = resolve_path(&world, &registry, holder, "items.Array.data[0]").unwrap();
        assert_eq!(terminal, FieldType::Struct(TypeName::from("SlotBase")));
    }

    #[test]
    fn test_runtime_element_type_refines_the_walk() {
        let (mut world, holder) = world_with_holder();
        world.set_instance(
            holder,
            ValueSpec::object("Holder", vec![(
                "items",
                ValueSpec::collection(vec![
                    ValueSpec::object("SlotBase", vec![("target", ValueSpec::reference(None))]),
                    ValueSpec::object("DerivedSlot", vec![("target", ValueSpec::reference(None))]),
                ]),
            )]),
        );
        let registry = world.registry().clone();

        // element 1 is a DerivedSlot at runtime; its shadowed field wins
        let resolved = resolve_path(&world, &registry, holder, "items.Array.data[1].target").unwrap();
        assert_eq!(resolved, FieldType::Reference(TypeName::from("Derived2")));

        // element 0 really is the base type
        let base = resolve_path(&world, &registry, holder, "items.Array.data[0].target").unwrap();
        assert_eq!(base, FieldType::Reference(TypeName::from("Object")));
    }

    #[test]
    fn test_out_of_range_index_falls_back_to_static() {
        let (mut world, holder) = world_with_holder();
        world.set_instance(
            holder,
            ValueSpec::object("Holder", vec![(
                "items",
                ValueSpec::collection(vec![ValueSpec::object("DerivedSlot", vec![])]),
            )]),
        );
        let registry = world.registry().clone();

        // index 5 has no live element: silent static fallback, not an error
        let resolved = resolve_path(&world, &registry, holder, "items.Array.data[5].target").unwrap();
        assert_eq!(resolved, FieldType::Reference(TypeName::from("Object")));
    }

    #[test]
    fn test_index_into_non_collection_fails() {
        let (world, holder) = world_with_holder();
        let registry = world.registry().clone();

        let error = resolve_path(&world, &registry, holder, "stats.Array.data[0]").unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::UnresolvedCollectionElement { index: 0, .. }
        ));
    }

    #[test]
    fn test_lookup_failures_surface_by_kind() {
        let (world, holder) = world_with_holder();
        let registry = world.registry().clone();

        let missing = resolve_path(&world, &registry, holder, "stats.agility").unwrap_err();
        assert!(matches!(
            missing.current_context(),
            Error::FieldNotFound { .. }
        ));

        // scalar terminals have no fields to continue into
        let scalar = resolve_path(&world, &registry, holder, "stats.strength.bits").unwrap_err();
        assert!(matches!(
            scalar.current_context(),
            Error::FieldNotFound { .. }
        ));

        let unknown_root = resolve_path(&world, &registry, ObjectId::new(9999), "stats").unwrap_err();
        assert!(matches!(
            unknown_root.current_context(),
            Error::UnknownObject(_)
        ));
    }
}
