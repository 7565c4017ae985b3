//! Edit-time object-reference picking, decoupled from any UI
//!
//! When an editor inspector shows a field that holds a reference to another
//! object, filling it has two halves: working out *what type* the field can
//! hold, and working out *which objects* qualify. This crate implements both
//! halves as a pure library over host capability traits; drawing the picker,
//! reading drag events, and writing the chosen value back stay on the host
//! side.
//!
//! - [`path`] resolves a property path like `items.Array.data[1].target`
//!   against the registered type model, preferring live runtime types over
//!   declared ones where an instance is inspectable.
//! - [`provider`] enumerates candidate objects lazily from the content store
//!   and from scene-graph traversals; [`policy`] composes the right provider
//!   set for a requested source mask; [`filter`] validates candidates
//!   against the field's type, substituting a node's attached component
//!   where that is what the field wants.
//! - [`picker`] ties it all together per field, and [`autopick`] fills a
//!   field with the first acceptable match without opening a picker at all.
//!
//! The host supplies its world through the [`world`] capability traits and
//! its type universe through a [`registry::TypeRegistry`];
//! [`world::memory::MemoryWorld`] is a complete in-memory host used by this
//! crate's own tests.
//!
//! # Usage
//!
//! ```
//! use refpick_core::config::{FieldOptions, PickerConfig};
//! use refpick_core::picker::FieldPicker;
//! use refpick_core::registry::{FieldType, ObjectCategory, TypeInfo, TypeRegistry};
//! use refpick_core::world::memory::MemoryWorld;
//!
//! # fn main() -> refpick_core::error::Result<()> {
//! let mut registry = TypeRegistry::new();
//! registry.register(TypeInfo::new("Object", ObjectCategory::AnyObject));
//! registry.register(TypeInfo::new("Node", ObjectCategory::Node).with_base("Object"));
//! registry.register(TypeInfo::new("Component", ObjectCategory::Component).with_base("Object"));
//! registry.register(
//!     TypeInfo::new("Turret", ObjectCategory::Component)
//!         .with_base("Component")
//!         .with_field("aim_at", FieldType::Reference("Node".into())),
//! );
//!
//! let mut world = MemoryWorld::new(registry);
//! let scene = world.add_scene();
//! let tower = world.spawn_root(scene, "Node");
//! let turret = world.attach(tower, "Turret");
//! let crossroads = world.spawn_root(scene, "Node");
//!
//! let config = PickerConfig::default();
//! let picker = FieldPicker::new(
//!     &world,
//!     world.registry(),
//!     &config,
//!     turret,
//!     "aim_at",
//!     FieldOptions::default(),
//! )?;
//!
//! let targets: Vec<_> = picker.candidates().map(|candidate| candidate.object).collect();
//! assert_eq!(targets, vec![tower, crossroads]);
//! # Ok(())
//! # }
//! ```

pub mod autopick;
pub mod candidate;
pub mod config;
pub mod error;
pub mod filter;
pub mod path;
pub mod picker;
pub mod policy;
pub mod provider;
pub mod registry;
pub mod world;

pub use candidate::{Candidate, SourceKind};
pub use config::{FieldOptions, PickerConfig};
pub use error::{Error, Result};
pub use picker::FieldPicker;
