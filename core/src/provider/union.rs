//! Sequential lazy union of providers
//!
//! Concatenation order equals supply order, which downstream governs
//! presentation order. Duplicates across members survive; only filters drop
//! candidates, and only for type mismatches.

use super::ObjectProvider;
use crate::candidate::Candidate;

/// Combines providers by concatenating their sequences in supplied order
///
/// A member's `lookup` is not even invoked until the consumer has exhausted
/// every sequence before it, so an expensive member costs nothing when the
/// caller stops early.
pub struct ProviderUnion<'a> {
    providers: Vec<Box<dyn ObjectProvider + 'a>>,
}

impl<'a> ProviderUnion<'a> {
    /// A union over the given providers, in presentation order
    #[must_use]
    pub const fn new(providers: Vec<Box<dyn ObjectProvider + 'a>>) -> Self {
        Self { providers }
    }

    /// A union with no members; its lookup yields nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Number of member providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the union has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ObjectProvider for ProviderUnion<'_> {
    fn lookup(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        Box::new(
            self.providers
                .iter()
                .flat_map(|provider| provider.lookup()),
        )
    }
}
