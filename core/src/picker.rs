//! Per-field picking façade
//!
//! A [`FieldPicker`] wires the whole pipeline together for one pickable field
//! of one object: declared-type resolution, session-default resolution,
//! provider policy, and candidate filtering. Hosts construct one per edited
//! field and drive their picker UI entirely through it; everything UI-shaped
//! (drawing, selection state, drag events) stays on the host side.

use tracing::debug;

use crate::autopick;
use crate::candidate::Candidate;
use crate::config::{AutoPickMode, FieldOptions, PickerConfig, PickerKind};
use crate::error::{Error, Result};
use crate::filter::{CandidateFilter, classify};
use crate::path::resolve_path;
use crate::policy::ProviderResolver;
use crate::provider::{ObjectProvider, ProviderUnion};
use crate::registry::{FieldType, TypeName, TypeRegistry};
use crate::world::{Host, ObjectId};

/// Pipeline façade for one pickable field of one object
///
/// Construction resolves everything per-field and static up front: the
/// declared field type behind the property path, the session defaults behind
/// any `Default`-valued options, the provider union for the resolved source
/// mask, and the candidate filter. The operations then answer the questions
/// a picker UI asks. Holds borrows of the host for its whole lifetime;
/// queries never mutate.
pub struct FieldPicker<'a, H> {
    host:      &'a H,
    owner:     ObjectId,
    declared:  FieldType,
    target:    TypeName,
    kind:      PickerKind,
    auto_pick: AutoPickMode,
    union:     ProviderUnion<'a>,
    filter:    CandidateFilter<'a>,
}

impl<H> std::fmt::Debug for FieldPicker<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPicker")
            .field("owner", &self.owner)
            .field("declared", &self.declared)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("auto_pick", &self.auto_pick)
            .finish_non_exhaustive()
    }
}

impl<'a, H> FieldPicker<'a, H>
where
    H: Host,
{
    /// Build the picker for `owner`'s field at `path`
    ///
    /// Fails when the path does not resolve against the registry, or when it
    /// resolves to something other than an object-reference slot. A host
    /// seeing either failure falls back to its plain field editor.
    pub fn new(
        host: &'a H,
        registry: &'a TypeRegistry,
        config: &'a PickerConfig,
        owner: ObjectId,
        path: &str,
        options: FieldOptions,
    ) -> Result<Self> {
        let declared = resolve_path(host, registry, owner, path)?;
        let Some(target) = declared.reference_target().cloned() else {
            return Err(Error::NonReferenceField {
                path: path.to_string(),
                declared,
            }
            .into());
        };

        let sources = config.resolve_sources(options.sources);
        let kind = config.resolve_picker(options.picker, &target);
        let auto_pick = config.resolve_auto_pick(options.auto_pick);

        let union = ProviderResolver::new(host, host, registry, options.include_external)
            .resolve(sources, &target, owner);
        let filter = CandidateFilter::new(
            host,
            registry,
            target.clone(),
            options.additional_type,
            options.custom_filter,
        );
        debug!(%owner, path, %target, "field picker constructed");

        Ok(Self {
            host,
            owner,
            declared,
            target,
            kind,
            auto_pick,
            union,
            filter,
        })
    }

    /// The field's pickable candidates, filtered, in provider order
    ///
    /// Lazy; nothing is discovered past what the caller consumes.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.union
            .lookup()
            .filter(|candidate| self.filter.accept(*candidate))
    }

    /// Whether assigning `object` to this field would be legal
    ///
    /// This is the drop-target check: the object need not have come from
    /// [`candidates`](Self::candidates).
    #[must_use]
    pub fn accepts(&self, object: ObjectId) -> bool {
        self.filter.accept(classify(self.host, object))
    }

    /// The object actually written when `object` is assigned to this field
    ///
    /// Applies node-to-component substitution. `None` when the assignment
    /// would be illegal.
    #[must_use]
    pub fn effective_assignment(&self, object: ObjectId) -> Option<ObjectId> {
        let candidate = classify(self.host, object);
        if !self.filter.accept(candidate) {
            return None;
        }
        self.filter
            .effective(candidate)
            .map(|effective| effective.object)
    }

    /// Run the field's auto-pick strategy
    pub fn auto_pick(&self) -> Result<Candidate> {
        autopick::auto_pick(self.host, self.auto_pick, self.owner, &self.target, &self.filter)
    }

    /// The resolved declared type of the field, for labeling
    #[must_use]
    pub const fn declared_type(&self) -> &FieldType {
        &self.declared
    }

    /// The reference target type every candidate must satisfy
    #[must_use]
    pub const fn target(&self) -> &TypeName {
        &self.target
    }

    /// How this field's candidates are presented
    #[must_use]
    pub const fn picker_kind(&self) -> PickerKind {
        self.kind
    }

    /// The concrete auto-pick strategy for this field
    ///
    /// `None` means auto-picking is disabled; invoking it anyway fails
    /// loudly.
    #[must_use]
    pub const fn auto_pick_mode(&self) -> AutoPickMode {
        self.auto_pick
    }
}
