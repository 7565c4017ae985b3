//! Host-populated type registry
//!
//! Path resolution and provider policy need a declared-type universe to walk,
//! and Rust has no runtime reflection to supply one, so it is modeled as
//! explicit data: named types with a single-inheritance base chain, an object
//! category, and declared fields. The host registers every type whose fields
//! can hold pickable references; the picker core only ever reads.

mod field_type;
mod type_name;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::warn;

pub use field_type::{FieldType, ScalarKind};
pub use type_name::TypeName;

use crate::error::{Error, Result};

/// Upper bound on base-chain walks, guarding against malformed registries
/// that declare a cycle
const BASE_CHAIN_LIMIT: usize = 64;

/// What kind of object a registered type denotes
///
/// Provider policy branches on this: only scene-object categories ever
/// trigger scene-side providers, and `AnyObject` (the universal base, which
/// the host registers exactly once) widens both policy and assignability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ObjectCategory {
    /// The universal store-object base type
    AnyObject,
    /// A plain asset object (textures, clips, data files)
    Asset,
    /// An attachable behavior living on a node
    Component,
    /// A plain serializable struct, not a store object
    Data,
    /// A scene-graph container node
    Node,
}

impl ObjectCategory {
    /// True for categories that denote store objects (addressable by
    /// [`ObjectId`](crate::world::ObjectId)), as opposed to inline data
    #[must_use]
    pub const fn is_store_object(self) -> bool {
        !matches!(self, Self::Data)
    }

    /// True for categories that can appear in a scene graph
    #[must_use]
    pub const fn is_scene_object(self) -> bool {
        matches!(self, Self::AnyObject | Self::Component | Self::Node)
    }
}

/// Registry entry for one named type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// The type's fully-qualified name
    pub name:     TypeName,
    /// The object category this type denotes
    pub category: ObjectCategory,
    /// Direct base type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base:     Option<TypeName>,
    /// Declared serialized fields, by field name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields:   HashMap<String, FieldType>,
}

impl TypeInfo {
    /// Create an entry with no base and no fields
    #[must_use]
    pub fn new(name: impl Into<TypeName>, category: ObjectCategory) -> Self {
        Self {
            name: name.into(),
            category,
            base: None,
            fields: HashMap::new(),
        }
    }

    /// Set the direct base type
    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeName>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Declare a serialized field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }
}

/// Name → [`TypeInfo`] lookup table
///
/// Hosts may build it in code or deserialize it from a manifest; either way
/// it is immutable for the duration of an edit session once handed to the
/// picker core.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    types: HashMap<TypeName, TypeInfo>,
}

impl TypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a type entry
    pub fn register(&mut self, info: TypeInfo) {
        self.types.insert(info.name.clone(), info);
    }

    /// Look up a type entry by name
    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Whether the name has an entry
    #[must_use]
    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// The category of a registered type, if known
    #[must_use]
    pub fn category_of(&self, name: &TypeName) -> Option<ObjectCategory> {
        self.get(name).map(|info| info.category)
    }

    /// Whether the named type denotes an attachable component
    #[must_use]
    pub fn is_component(&self, name: &TypeName) -> bool {
        self.category_of(name) == Some(ObjectCategory::Component)
    }

    /// Whether the named type denotes a scene-graph node
    #[must_use]
    pub fn is_node(&self, name: &TypeName) -> bool {
        self.category_of(name) == Some(ObjectCategory::Node)
    }

    /// Whether the named type is the universal store-object base
    #[must_use]
    pub fn is_any_object(&self, name: &TypeName) -> bool {
        self.category_of(name) == Some(ObjectCategory::AnyObject)
    }

    /// Resolve a field by name, searching the type itself and then its base
    /// chain most-derived-first
    ///
    /// The first declaration found wins, so a derived type shadowing a base
    /// field resolves to the derived declaration. An unregistered starting
    /// type is [`Error::TypeNotRegistered`]; exhausting the chain is
    /// [`Error::FieldNotFound`].
    pub fn field_type(&self, type_name: &TypeName, field: &str) -> Result<FieldType> {
        if !self.contains(type_name) {
            return Err(Error::TypeNotRegistered(type_name.clone()).into());
        }

        for info in self.ancestry(type_name) {
            if let Some(field_type) = info.fields.get(field) {
                return Ok(field_type.clone());
            }
        }

        Err(Error::field_not_found(type_name.clone(), field).into())
    }

    /// Whether an object of runtime type `src` can be assigned to a field
    /// declared as `dst`
    ///
    /// Identity, any ancestor of `src`, or `dst` being the universal base
    /// while `src` denotes a store object. Unregistered names are never
    /// assignable to anything but themselves.
    #[must_use]
    pub fn is_assignable(&self, src: &TypeName, dst: &TypeName) -> bool {
        if src == dst {
            return true;
        }

        if self.is_any_object(dst) {
            return self
                .category_of(src)
                .is_some_and(ObjectCategory::is_store_object);
        }

        self.ancestry(src).any(|info| &info.name == dst)
    }

    /// Walk a type and its base chain, most-derived-first
    ///
    /// Stops at unregistered bases and at [`BASE_CHAIN_LIMIT`] entries.
    fn ancestry<'a>(&'a self, name: &TypeName) -> impl Iterator<Item = &'a TypeInfo> {
        let mut next = self.get(name);
        let mut visited = 0usize;
        std::iter::from_fn(move || {
            if visited >= BASE_CHAIN_LIMIT {
                warn!(type_name = %name_of(next), "base chain exceeds limit, registry may declare a cycle");
                return None;
            }
            let current = next?;
            visited += 1;
            next = current.base.as_ref().and_then(|base| self.get(base));
            Some(current)
        })
    }
}

/// Display helper for the cycle warning; `next` may already be exhausted
fn name_of(info: Option<&TypeInfo>) -> &str {
    info.map_or("<none>", |info| info.name.as_str())
}
