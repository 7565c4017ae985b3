//! In-memory reference host
//!
//! A self-contained implementation of every capability trait, used by the
//! crate's own tests and as a worked example for host integrators. Scenes,
//! nodes, components, assets, and live value trees are all plain data here.
//!
//! Host rules this world commits to:
//! - a store path lies in the project scope iff it starts with `assets/`
//! - scene-file and container status are per-record flags set at build time
//! - the asset key of a stored item is its path string

use std::collections::HashMap;

use tracing::warn;

use super::{
    AssetKey, AssetPath, AssetStore, InstanceRef, InstanceView, ObjectId, SceneGraph, SceneId,
};
use crate::registry::{TypeName, TypeRegistry};

/// Prefix of store paths considered inside the project scope
const PROJECT_PREFIX: &str = "assets/";

/// Everything a host would own, in one mutable value
///
/// Build the world up front with the `add_*`/`spawn_*`/`attach*` methods,
/// then hand it to the picker core as `&dyn` capability traits. Queries never
/// mutate.
#[derive(Debug)]
pub struct MemoryWorld {
    registry:         TypeRegistry,
    objects:          HashMap<ObjectId, ObjectRecord>,
    scenes:           HashMap<SceneId, Vec<ObjectId>>,
    assets:           HashMap<AssetKey, AssetRecord>,
    asset_order:      Vec<AssetKey>,
    paths:            HashMap<AssetPath, AssetKey>,
    instances:        Vec<InstanceNode>,
    object_instances: HashMap<ObjectId, InstanceRef>,
    next_object:      u64,
    next_scene:       u64,
}

#[derive(Debug)]
struct ObjectRecord {
    type_name: TypeName,
    role:      Role,
}

#[derive(Debug)]
enum Role {
    Node(NodeData),
    Component { owner: ObjectId, active: bool },
    Asset,
}

#[derive(Debug, Default)]
struct NodeData {
    scene:      Option<SceneId>,
    parent:     Option<ObjectId>,
    children:   Vec<ObjectId>,
    components: Vec<ObjectId>,
}

#[derive(Debug)]
struct AssetRecord {
    path:         AssetPath,
    primary:      ObjectId,
    sub_objects:  Vec<ObjectId>,
    is_scene:     bool,
    is_container: bool,
}

/// One value in a live instance tree
///
/// Specs are consumed by [`MemoryWorld::set_instance`] and turned into arena
/// nodes; only the type structure matters to the picker core, so scalars
/// carry no payload.
#[derive(Debug)]
pub enum ValueSpec {
    /// A struct-like value with a runtime type and named fields
    Object {
        /// Runtime type of the value
        type_name: TypeName,
        /// Field values by name
        fields:    Vec<(String, ValueSpec)>,
    },
    /// An ordered collection of element values
    Collection(Vec<ValueSpec>),
    /// An object-reference slot, possibly empty
    Reference(Option<ObjectId>),
    /// Any primitive value
    Scalar,
}

impl ValueSpec {
    /// A struct-like value of the given runtime type
    #[must_use]
    pub fn object(type_name: impl Into<TypeName>, fields: Vec<(&str, Self)>) -> Self {
        Self::Object {
            type_name: type_name.into(),
            fields:    fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// An ordered collection of the given elements
    #[must_use]
    pub fn collection(items: Vec<Self>) -> Self {
        Self::Collection(items)
    }

    /// An object-reference slot
    #[must_use]
    pub const fn reference(target: Option<ObjectId>) -> Self {
        Self::Reference(target)
    }
}

#[derive(Debug)]
enum InstanceNode {
    Object {
        type_name: TypeName,
        fields:    HashMap<String, InstanceRef>,
    },
    Collection(Vec<InstanceRef>),
    Reference(Option<ObjectId>),
    Scalar,
}

impl MemoryWorld {
    /// Create an empty world over the given registry
    ///
    /// The registry drives typed queries (component filtering, asset search),
    /// exactly as the host's own type system would.
    #[must_use]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry,
            objects: HashMap::new(),
            scenes: HashMap::new(),
            assets: HashMap::new(),
            asset_order: Vec::new(),
            paths: HashMap::new(),
            instances: Vec::new(),
            object_instances: HashMap::new(),
            next_object: 1,
            next_scene: 1,
        }
    }

    /// The registry this world answers typed queries with
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Open a new empty scene
    pub fn add_scene(&mut self) -> SceneId {
        let id = SceneId::new(self.next_scene);
        self.next_scene += 1;
        self.scenes.insert(id, Vec::new());
        id
    }

    /// Create a root node in a scene
    pub fn spawn_root(&mut self, scene: SceneId, type_name: impl Into<TypeName>) -> ObjectId {
        let node = self.alloc(type_name.into(), Role::Node(NodeData {
            scene: Some(scene),
            ..NodeData::default()
        }));
        self.scenes.entry(scene).or_default().push(node);
        node
    }

    /// Create a child node under an existing node
    ///
    /// A non-node parent is reported and the child is created detached.
    pub fn spawn_child(&mut self, parent: ObjectId, type_name: impl Into<TypeName>) -> ObjectId {
        let Some(scene) = self.node_data(parent).map(|data| data.scene) else {
            warn!(%parent, "spawn_child parent is not a node, creating a detached node");
            return self.alloc(type_name.into(), Role::Node(NodeData::default()));
        };
        let child = self.alloc(type_name.into(), Role::Node(NodeData {
            scene,
            parent: Some(parent),
            ..NodeData::default()
        }));
        if let Some(data) = self.node_data_mut(parent) {
            data.children.push(child);
        }
        child
    }

    /// Attach an active component to a node
    pub fn attach(&mut self, node: ObjectId, type_name: impl Into<TypeName>) -> ObjectId {
        self.attach_with_activity(node, type_name.into(), true)
    }

    /// Attach an inactive component to a node
    pub fn attach_inactive(&mut self, node: ObjectId, type_name: impl Into<TypeName>) -> ObjectId {
        self.attach_with_activity(node, type_name.into(), false)
    }

    fn attach_with_activity(
        &mut self,
        node: ObjectId,
        type_name: TypeName,
        active: bool,
    ) -> ObjectId {
        let component = self.alloc(type_name, Role::Component { owner: node, active });
        if let Some(data) = self.node_data_mut(node) {
            data.components.push(component);
        } else {
            warn!(%node, "attach target is not a node, component unreachable from scene queries");
        }
        component
    }

    /// Store a plain asset at a path, returning its key and primary object
    pub fn add_asset(&mut self, path: &str, type_name: impl Into<TypeName>) -> (AssetKey, ObjectId) {
        self.add_record(path, type_name.into(), false, false)
    }

    /// Store a scene file at a path
    ///
    /// Scene files carry a single typed primary object and refuse
    /// [`load_all`](AssetStore::load_all).
    pub fn add_scene_asset(
        &mut self,
        path: &str,
        type_name: impl Into<TypeName>,
    ) -> (AssetKey, ObjectId) {
        self.add_record(path, type_name.into(), true, false)
    }

    /// Store a container (prefab-like) asset whose primary object is a node
    ///
    /// Attach components and spawn children on the returned node to flesh the
    /// container out; it belongs to no scene.
    pub fn add_container_asset(
        &mut self,
        path: &str,
        root_type: impl Into<TypeName>,
    ) -> (AssetKey, ObjectId) {
        self.add_record(path, root_type.into(), false, true)
    }

    /// Add a sub-object to an existing asset record
    pub fn add_sub_object(&mut self, key: &AssetKey, type_name: impl Into<TypeName>) -> ObjectId {
        let sub = self.alloc(type_name.into(), Role::Asset);
        if let Some(record) = self.assets.get_mut(key) {
            record.sub_objects.push(sub);
        } else {
            warn!(%key, "sub-object added under an unknown asset key");
        }
        sub
    }

    /// Attach a live value tree to an object, making it inspectable
    pub fn set_instance(&mut self, object: ObjectId, value: ValueSpec) {
        let root = self.alloc_value(value);
        self.object_instances.insert(object, root);
    }

    fn add_record(
        &mut self,
        path: &str,
        type_name: TypeName,
        is_scene: bool,
        is_container: bool,
    ) -> (AssetKey, ObjectId) {
        let role = if is_container {
            Role::Node(NodeData::default())
        } else {
            Role::Asset
        };
        let primary = self.alloc(type_name, role);
        let key = AssetKey::from(path);
        let asset_path = AssetPath::from(path);
        self.paths.insert(asset_path.clone(), key.clone());
        self.asset_order.push(key.clone());
        self.assets.insert(key.clone(), AssetRecord {
            path: asset_path,
            primary,
            sub_objects: Vec::new(),
            is_scene,
            is_container,
        });
        (key, primary)
    }

    fn alloc(&mut self, type_name: TypeName, role: Role) -> ObjectId {
        let id = ObjectId::new(self.next_object);
        self.next_object += 1;
        self.objects.insert(id, ObjectRecord { type_name, role });
        id
    }

    fn alloc_value(&mut self, spec: ValueSpec) -> InstanceRef {
        let node = match spec {
            ValueSpec::Object { type_name, fields } => {
                let mut resolved = HashMap::with_capacity(fields.len());
                for (name, value) in fields {
                    let slot = self.alloc_value(value);
                    resolved.insert(name, slot);
                }
                InstanceNode::Object {
                    type_name,
                    fields: resolved,
                }
            }
            ValueSpec::Collection(items) => {
                let mut slots = Vec::with_capacity(items.len());
                for item in items {
                    slots.push(self.alloc_value(item));
                }
                InstanceNode::Collection(slots)
            }
            ValueSpec::Reference(target) => InstanceNode::Reference(target),
            ValueSpec::Scalar => InstanceNode::Scalar,
        };
        let index = self.instances.len();
        self.instances.push(node);
        InstanceRef::new(index)
    }

    fn node_data(&self, id: ObjectId) -> Option<&NodeData> {
        match &self.objects.get(&id)?.role {
            Role::Node(data) => Some(data),
            Role::Component { .. } | Role::Asset => None,
        }
    }

    fn node_data_mut(&mut self, id: ObjectId) -> Option<&mut NodeData> {
        match &mut self.objects.get_mut(&id)?.role {
            Role::Node(data) => Some(data),
            Role::Component { .. } | Role::Asset => None,
        }
    }

    fn record_at(&self, path: &AssetPath) -> Option<&AssetRecord> {
        self.paths.get(path).and_then(|key| self.assets.get(key))
    }

    fn object_assignable(&self, id: ObjectId, target: &TypeName) -> bool {
        self.objects
            .get(&id)
            .is_some_and(|object| self.registry.is_assignable(&object.type_name, target))
    }
}

impl AssetStore for MemoryWorld {
    fn find_assets_by_type(&self, type_name: &TypeName) -> Vec<AssetKey> {
        self.asset_order
            .iter()
            .filter(|key| {
                self.assets
                    .get(key)
                    .is_some_and(|record| self.object_assignable(record.primary, type_name))
            })
            .cloned()
            .collect()
    }

    fn asset_path(&self, key: &AssetKey) -> Option<AssetPath> {
        self.assets.get(key).map(|record| record.path.clone())
    }

    fn is_scene_path(&self, path: &AssetPath) -> bool {
        self.record_at(path).is_some_and(|record| record.is_scene)
    }

    fn is_project_path(&self, path: &AssetPath) -> bool {
        path.as_str().starts_with(PROJECT_PREFIX)
    }

    fn load_primary(&self, path: &AssetPath, type_name: &TypeName) -> Option<ObjectId> {
        let record = self.record_at(path)?;
        if self.object_assignable(record.primary, type_name) {
            return Some(record.primary);
        }
        record
            .sub_objects
            .iter()
            .find(|sub| self.object_assignable(**sub, type_name))
            .copied()
    }

    fn load_all(&self, path: &AssetPath) -> Vec<ObjectId> {
        let Some(record) = self.record_at(path) else {
            return Vec::new();
        };
        if record.is_scene {
            warn!(%path, "load_all refused for a scene path");
            return Vec::new();
        }
        let mut all = Vec::with_capacity(1 + record.sub_objects.len());
        all.push(record.primary);
        all.extend_from_slice(&record.sub_objects);
        all
    }

    fn matches_key(&self, object: ObjectId, key: &AssetKey) -> bool {
        self.assets
            .get(key)
            .is_some_and(|record| record.primary == object)
    }

    fn container_assets(&self) -> Vec<AssetKey> {
        self.asset_order
            .iter()
            .filter(|key| {
                self.assets
                    .get(key)
                    .is_some_and(|record| record.is_container)
            })
            .cloned()
            .collect()
    }

    fn load_container(&self, path: &AssetPath) -> Option<ObjectId> {
        self.record_at(path)
            .filter(|record| record.is_container)
            .map(|record| record.primary)
    }
}

impl SceneGraph for MemoryWorld {
    fn runtime_type(&self, object: ObjectId) -> Option<TypeName> {
        self.objects
            .get(&object)
            .map(|record| record.type_name.clone())
    }

    fn scene_of(&self, object: ObjectId) -> Option<SceneId> {
        match &self.objects.get(&object)?.role {
            Role::Node(data) => data.scene,
            Role::Component { owner, .. } => self.scene_of(*owner),
            Role::Asset => None,
        }
    }

    fn node_of(&self, object: ObjectId) -> Option<ObjectId> {
        match &self.objects.get(&object)?.role {
            Role::Node(_) => Some(object),
            Role::Component { owner, .. } => Some(*owner),
            Role::Asset => None,
        }
    }

    fn root_nodes(&self, scene: SceneId) -> Vec<ObjectId> {
        self.scenes.get(&scene).cloned().unwrap_or_default()
    }

    fn children(&self, node: ObjectId) -> Vec<ObjectId> {
        self.node_data(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: ObjectId) -> Option<ObjectId> {
        self.node_data(node)?.parent
    }

    fn components_on(
        &self,
        node: ObjectId,
        type_filter: Option<&TypeName>,
        include_inactive: bool,
    ) -> Vec<ObjectId> {
        let Some(data) = self.node_data(node) else {
            return Vec::new();
        };
        data.components
            .iter()
            .copied()
            .filter(|id| {
                let Some(record) = self.objects.get(id) else {
                    return false;
                };
                let Role::Component { active, .. } = &record.role else {
                    return false;
                };
                if !include_inactive && !*active {
                    return false;
                }
                type_filter
                    .is_none_or(|target| self.registry.is_assignable(&record.type_name, target))
            })
            .collect()
    }
}

impl InstanceView for MemoryWorld {
    fn instance_of(&self, object: ObjectId) -> Option<InstanceRef> {
        self.object_instances.get(&object).copied()
    }

    fn instance_type(&self, instance: InstanceRef) -> Option<TypeName> {
        match self.instances.get(instance.index())? {
            InstanceNode::Object { type_name, .. } => Some(type_name.clone()),
            InstanceNode::Reference(Some(target)) => self.runtime_type(*target),
            InstanceNode::Reference(None) | InstanceNode::Collection(_) | InstanceNode::Scalar => {
                None
            }
        }
    }

    fn field(&self, instance: InstanceRef, name: &str) -> Option<InstanceRef> {
        match self.instances.get(instance.index())? {
            InstanceNode::Object { fields, .. } => fields.get(name).copied(),
            InstanceNode::Collection(_) | InstanceNode::Reference(_) | InstanceNode::Scalar => None,
        }
    }

    fn element(&self, instance: InstanceRef, index: usize) -> Option<InstanceRef> {
        match self.instances.get(instance.index())? {
            InstanceNode::Collection(items) => items.get(index).copied(),
            InstanceNode::Object { .. } | InstanceNode::Reference(_) | InstanceNode::Scalar => None,
        }
    }
}
