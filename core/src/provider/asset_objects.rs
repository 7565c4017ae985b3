//! Content-store provider
//!
//! Walks the store's type query one key at a time. Scene-path keys load the
//! single typed primary asset; every other key enumerates its sub-objects
//! and keeps those whose identity matches the located key, or that pass the
//! optional predicate. Keys outside the canonical project scope are skipped
//! unless externals were asked for.

use std::collections::VecDeque;

use tracing::warn;

use super::ObjectProvider;
use crate::candidate::Candidate;
use crate::config::CandidateTest;
use crate::registry::TypeName;
use crate::world::{AssetKey, AssetStore};

/// Yields stored objects assignable to a target type
pub struct AssetObjects<'a> {
    store:            &'a dyn AssetStore,
    target:           TypeName,
    predicate:        Option<CandidateTest>,
    include_external: bool,
}

impl<'a> AssetObjects<'a> {
    /// Provider over stored items assignable to `target`
    #[must_use]
    pub const fn new(
        store: &'a dyn AssetStore,
        target: TypeName,
        predicate: Option<CandidateTest>,
        include_external: bool,
    ) -> Self {
        Self {
            store,
            target,
            predicate,
            include_external,
        }
    }

    /// Whether a sub-object stays in the sequence for the key it came from
    fn includes(&self, candidate: Candidate, key: &AssetKey) -> bool {
        self.store.matches_key(candidate.object, key)
            || self
                .predicate
                .as_ref()
                .is_some_and(|predicate| predicate(candidate))
    }

    /// Whether the optional predicate admits a candidate
    fn passes(&self, candidate: Candidate) -> bool {
        self.predicate
            .as_ref()
            .is_none_or(|predicate| predicate(candidate))
    }
}

impl ObjectProvider for AssetObjects<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let mut keys = self.store.find_assets_by_type(&self.target).into_iter();
        let mut pending: VecDeque<Candidate> = VecDeque::new();
        Box::new(std::iter::from_fn(move || {
            loop {
                if let Some(candidate) = pending.pop_front() {
                    return Some(candidate);
                }
                let key = keys.next()?;
                let Some(path) = self.store.asset_path(&key) else {
                    warn!(%key, "store returned a key with no path, skipping");
                    continue;
                };
                if !self.include_external && !self.store.is_project_path(&path) {
                    continue;
                }
                if self.store.is_scene_path(&path) {
                    // single typed load; sub-object enumeration is forbidden
                    if let Some(object) = self.store.load_primary(&path, &self.target) {
                        let candidate = Candidate::asset(object);
                        if self.passes(candidate) {
                            return Some(candidate);
                        }
                    }
                    continue;
                }
                pending.extend(
                    self.store
                        .load_all(&path)
                        .into_iter()
                        .map(Candidate::asset)
                        .filter(|candidate| self.includes(*candidate, &key)),
                );
            }
        }))
    }
}
