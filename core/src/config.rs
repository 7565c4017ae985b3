//! Session configuration and per-field options
//!
//! The session-wide defaults live in an explicit, immutable [`PickerConfig`]
//! constructed once at edit-session start and passed through the policy and
//! façade layers. `Default`-valued options defer to it; a host that supplies
//! no configuration gets the hard-coded fallbacks.

use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::candidate::Candidate;
use crate::registry::TypeName;

/// Caller-supplied candidate predicate
///
/// Supplied as a function value at configuration time, shared by clone into
/// whatever filter consumes it.
pub type CandidateTest = Arc<dyn Fn(Candidate) -> bool>;

bitflags! {
    /// Which discovery sources a lookup draws from
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SourceMask: u32 {
        /// The content store.
        const ASSETS = 1 << 0;

        /// The whole scene the owner belongs to.
        const SCENE = 1 << 1;

        /// The subtree rooted at the owner's node.
        const CHILDREN = 1 << 2;

        /// The subtree rooted at the owner's topmost ancestor.
        const ROOT_CHILDREN = 1 << 3;

        /// Defer to the session default mask.
        const DEFAULT = 1 << 31;
    }
}

/// How a picker presents its candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PickerKind {
    /// Inline dropdown under the field
    Dropdown,
    /// Standalone searchable window
    Window,
    /// Defer to the session default (window-list types open a window)
    Default,
}

/// One-shot strategy used to fill a field without opening a picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoPickMode {
    /// Auto-picking disabled
    None,
    /// First matching component directly on the owner's node
    FindInSelf,
    /// First match scanning the owner's node and its descendants
    FindInChildren,
    /// First match scanning the owner's node and its ancestors
    FindInParent,
    /// First match anywhere in the owner's scene
    FindGlobally,
    /// Defer to the session default mode
    Default,
}

/// Session-wide picker defaults
///
/// Serde-derivable so a host can ship it as part of its settings manifest;
/// missing fields fall back to [`PickerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Sources searched when a field asks for [`SourceMask::DEFAULT`]
    pub default_sources:     SourceMask,
    /// Presentation used when a field asks for [`PickerKind::Default`] and
    /// its type is not in the window list
    pub default_picker:      PickerKind,
    /// Strategy used when a field asks for [`AutoPickMode::Default`]
    pub default_auto_pick:   AutoPickMode,
    /// Declared types that open the window-style picker (exact name match)
    pub window_picker_types: Vec<TypeName>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_sources:     SourceMask::ASSETS | SourceMask::SCENE,
            default_picker:      PickerKind::Dropdown,
            default_auto_pick:   AutoPickMode::None,
            window_picker_types: Vec::new(),
        }
    }
}

impl PickerConfig {
    /// Replace a [`SourceMask::DEFAULT`] bit with the session default mask
    ///
    /// Explicit bits supplied alongside `DEFAULT` are kept.
    #[must_use]
    pub fn resolve_sources(&self, requested: SourceMask) -> SourceMask {
        if requested.contains(SourceMask::DEFAULT) {
            (requested - SourceMask::DEFAULT) | self.default_sources
        } else {
            requested
        }
    }

    /// Map [`PickerKind::Default`] to a concrete presentation
    ///
    /// Window-list membership wins, then the session default. The result is
    /// never `Default`, even for a degenerate configuration.
    #[must_use]
    pub fn resolve_picker(&self, requested: PickerKind, declared: &TypeName) -> PickerKind {
        let resolved = match requested {
            PickerKind::Default => {
                if self.window_picker_types.contains(declared) {
                    PickerKind::Window
                } else {
                    self.default_picker
                }
            }
            explicit => explicit,
        };
        if resolved == PickerKind::Default {
            PickerKind::Dropdown
        } else {
            resolved
        }
    }

    /// Map [`AutoPickMode::Default`] to a concrete strategy
    ///
    /// The result is never `Default`; a degenerate configuration degrades to
    /// disabled.
    #[must_use]
    pub fn resolve_auto_pick(&self, requested: AutoPickMode) -> AutoPickMode {
        let resolved = match requested {
            AutoPickMode::Default => self.default_auto_pick,
            explicit => explicit,
        };
        if resolved == AutoPickMode::Default {
            AutoPickMode::None
        } else {
            resolved
        }
    }
}

/// Per-field picker options
///
/// Everything defaults to deferring, so an empty `FieldOptions` means
/// "whatever the session says". Not serializable because the custom filter
/// is a function value.
#[derive(Clone)]
pub struct FieldOptions {
    /// Requested discovery sources
    pub sources:          SourceMask,
    /// Requested presentation
    pub picker:           PickerKind,
    /// Requested auto-pick strategy
    pub auto_pick:        AutoPickMode,
    /// Extra type the candidate must also be assignable to
    pub additional_type:  Option<TypeName>,
    /// Caller predicate over the effective candidate
    pub custom_filter:    Option<CandidateTest>,
    /// Whether asset discovery may include stored content outside the
    /// project scope
    pub include_external: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            sources:          SourceMask::DEFAULT,
            picker:           PickerKind::Default,
            auto_pick:        AutoPickMode::Default,
            additional_type:  None,
            custom_filter:    None,
            include_external: false,
        }
    }
}

impl std::fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldOptions")
            .field("sources", &self.sources)
            .field("picker", &self.picker)
            .field("auto_pick", &self.auto_pick)
            .field("additional_type", &self.additional_type)
            .field("custom_filter", &self.custom_filter.is_some())
            .field("include_external", &self.include_external)
            .finish()
    }
}

impl FieldOptions {
    /// Options restricted to the given sources
    #[must_use]
    pub fn with_sources(mut self, sources: SourceMask) -> Self {
        self.sources = sources;
        self
    }

    /// Options with an explicit presentation
    #[must_use]
    pub fn with_picker(mut self, picker: PickerKind) -> Self {
        self.picker = picker;
        self
    }

    /// Options with an explicit auto-pick strategy
    #[must_use]
    pub fn with_auto_pick(mut self, mode: AutoPickMode) -> Self {
        self.auto_pick = mode;
        self
    }

    /// Options narrowing candidates to an additional type
    #[must_use]
    pub fn with_additional_type(mut self, type_name: impl Into<TypeName>) -> Self {
        self.additional_type = Some(type_name.into());
        self
    }

    /// Options with a caller predicate over the effective candidate
    #[must_use]
    pub fn with_custom_filter(mut self, test: CandidateTest) -> Self {
        self.custom_filter = Some(test);
        self
    }

    /// Options that let asset discovery reach outside the project scope
    #[must_use]
    pub fn with_external_assets(mut self) -> Self {
        self.include_external = true;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask_resolution_keeps_explicit_bits() {
        let config = PickerConfig::default();

        let deferred = config.resolve_sources(SourceMask::DEFAULT);
        assert_eq!(deferred, SourceMask::ASSETS | SourceMask::SCENE);

        let mixed = config.resolve_sources(SourceMask::DEFAULT | SourceMask::CHILDREN);
        assert!(mixed.contains(SourceMask::CHILDREN));
        assert!(mixed.contains(SourceMask::ASSETS));
        assert!(!mixed.contains(SourceMask::DEFAULT));

        let explicit = config.resolve_sources(SourceMask::ROOT_CHILDREN);
        assert_eq!(explicit, SourceMask::ROOT_CHILDREN);
    }

    #[test]
    fn test_picker_resolution_consults_window_list() {
        let config = PickerConfig {
            window_picker_types: vec![TypeName::from("Texture")],
            ..PickerConfig::default()
        };

        let texture = TypeName::from("Texture");
        let weapon = TypeName::from("Weapon");

        assert_eq!(
            config.resolve_picker(PickerKind::Default, &texture),
            PickerKind::Window
        );
        assert_eq!(
            config.resolve_picker(PickerKind::Default, &weapon),
            PickerKind::Dropdown
        );
        // explicit requests are never overridden by the list
        assert_eq!(
            config.resolve_picker(PickerKind::Dropdown, &texture),
            PickerKind::Dropdown
        );
    }

    #[test]
    fn test_degenerate_defaults_resolve_concrete() {
        let config = PickerConfig {
            default_picker:    PickerKind::Default,
            default_auto_pick: AutoPickMode::Default,
            ..PickerConfig::default()
        };

        let name = TypeName::from("Weapon");
        assert_eq!(
            config.resolve_picker(PickerKind::Default, &name),
            PickerKind::Dropdown
        );
        assert_eq!(
            config.resolve_auto_pick(AutoPickMode::Default),
            AutoPickMode::None
        );
        assert_eq!(
            config.resolve_auto_pick(AutoPickMode::FindInSelf),
            AutoPickMode::FindInSelf
        );
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: PickerConfig =
            serde_json::from_value(serde_json::json!({ "default_picker": "window" })).unwrap();
        assert_eq!(config.default_picker, PickerKind::Window);
        assert_eq!(
            config.default_sources,
            SourceMask::ASSETS | SourceMask::SCENE
        );
    }
}
