//! Host capability contracts
//!
//! The picker core never owns a scene or an asset database; it consumes them
//! through the narrow traits here. Hosts implement [`AssetStore`] over their
//! content database, [`SceneGraph`] over their live object forest, and
//! [`InstanceView`] over whatever live-value inspection they can offer (an
//! empty view is legal; path resolution then runs on declared types alone).
//!
//! [`memory::MemoryWorld`] implements all three in-process and doubles as
//! executable documentation of the contracts.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::registry::TypeName;

/// Handle to any store object: a scene node, an attached component, or an
/// asset. Allocation and meaning are entirely host-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Wrap a raw host identifier
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host identifier
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one loaded scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(u64);

impl SceneId {
    /// Wrap a raw host identifier
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host identifier
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Opaque identifier of a stored item, as returned by asset queries
///
/// Only ever produced and consumed by the host's [`AssetStore`]; the core
/// treats it as a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Get the underlying string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A store path an [`AssetKey`] resolves to
///
/// Whether a path lies inside the canonical project scope, or denotes a
/// scene file, are host rules answered by [`AssetStore`]; the core never
/// inspects the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPath(String);

impl AssetPath {
    /// Get the underlying string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle into a host's live-value inspection arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceRef(usize);

impl InstanceRef {
    /// Wrap a raw arena index
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Content database facade
///
/// One capability per method. Query results are eager; the per-item loads
/// triggered while a provider sequence is pulled are where the cost lives.
pub trait AssetStore {
    /// All stored item keys whose primary object is of (or derives from) the
    /// given type
    fn find_assets_by_type(&self, type_name: &TypeName) -> Vec<AssetKey>;

    /// Resolve a key to its store path
    fn asset_path(&self, key: &AssetKey) -> Option<AssetPath>;

    /// Host rule: does this path denote a scene file?
    ///
    /// Scene files forbid sub-object enumeration; providers load the single
    /// typed primary asset instead. The boundary between "container asset"
    /// and "scene-like asset" is environment-defined, which is why it lives
    /// here and not in provider logic.
    fn is_scene_path(&self, path: &AssetPath) -> bool;

    /// Host rule: does this path lie inside the canonical project scope?
    fn is_project_path(&self, path: &AssetPath) -> bool;

    /// Load the primary object of the given type at a path
    fn load_primary(&self, path: &AssetPath, type_name: &TypeName) -> Option<ObjectId>;

    /// Enumerate every object stored at a path (primary and sub-objects)
    ///
    /// Must not be called for paths where [`is_scene_path`](Self::is_scene_path)
    /// holds.
    fn load_all(&self, path: &AssetPath) -> Vec<ObjectId>;

    /// Whether an object is the located item the key points at (as opposed
    /// to one of its sub-objects)
    fn matches_key(&self, object: ObjectId, key: &AssetKey) -> bool;

    /// Keys of all container (prefab-like) assets
    fn container_assets(&self) -> Vec<AssetKey>;

    /// Load a container asset's root node
    fn load_container(&self, path: &AssetPath) -> Option<ObjectId>;
}

/// Live object forest facade
pub trait SceneGraph {
    /// Runtime type of any store object
    fn runtime_type(&self, object: ObjectId) -> Option<TypeName>;

    /// Scene an object belongs to (`None` for assets and container nodes)
    fn scene_of(&self, object: ObjectId) -> Option<SceneId>;

    /// The node an object resolves to: identity for nodes, the owning node
    /// for components, `None` otherwise
    fn node_of(&self, object: ObjectId) -> Option<ObjectId>;

    /// Root nodes of a scene, in scene order
    fn root_nodes(&self, scene: SceneId) -> Vec<ObjectId>;

    /// Direct children of a node, in hierarchy order
    fn children(&self, node: ObjectId) -> Vec<ObjectId>;

    /// Direct parent of a node (`None` at the top of the hierarchy)
    fn parent(&self, node: ObjectId) -> Option<ObjectId>;

    /// Components attached to a node, optionally restricted to a type
    /// (assignability included), optionally including inactive ones
    fn components_on(
        &self,
        node: ObjectId,
        type_filter: Option<&TypeName>,
        include_inactive: bool,
    ) -> Vec<ObjectId>;

    /// The topmost ancestor of a node (itself when unparented)
    fn topmost_ancestor(&self, node: ObjectId) -> ObjectId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }
}

/// Live-value inspection for path resolution
///
/// Everything here is optional capability: answering `None` everywhere makes
/// path resolution fall back to declared types, the same degradation as
/// resolving with no instance at hand. Field traversal stops at
/// object-reference boundaries; a reference slot is a terminal from the
/// serialized-graph point of view.
pub trait InstanceView {
    /// The live value tree behind a store object, if inspectable
    fn instance_of(&self, object: ObjectId) -> Option<InstanceRef>;

    /// Runtime type of a live value (`None` for scalars, collections, and
    /// empty reference slots)
    fn instance_type(&self, instance: InstanceRef) -> Option<TypeName>;

    /// A named field's live value on a struct-like instance
    fn field(&self, instance: InstanceRef, name: &str) -> Option<InstanceRef>;

    /// An indexed element's live value on a collection instance
    fn element(&self, instance: InstanceRef, index: usize) -> Option<InstanceRef>;
}

/// The full capability bundle the façade and policy layers consume
pub trait Host: AssetStore + SceneGraph + InstanceView {}

impl<T> Host for T where T: AssetStore + SceneGraph + InstanceView {}
