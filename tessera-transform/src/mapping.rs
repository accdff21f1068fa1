//! Identifier mappings produced during a transform pass

use tessera_core::LocalIdentifier;
use tessera_graph::{Term, TripleSet};

/// A one-to-one relation from an old subject/object (blank node or foreign
/// IRI) to a newly minted local identifier
///
/// Valid only for the lifetime of one transform pass. Whether the old
/// identifier is preserved as provenance is the producing step's decision:
/// foreign IRIs are, blank nodes are not.
#[derive(Clone, Debug)]
pub struct IdentifierMapping {
    /// The identifier being replaced
    pub old: Term,
    /// The replacement
    pub new: LocalIdentifier,
}

impl IdentifierMapping {
    /// Create a mapping
    pub fn new(old: Term, new: LocalIdentifier) -> Self {
        Self { old, new }
    }

    /// Substitute every occurrence of each mapping's old term in the set.
    ///
    /// Returns the number of term positions rewritten across all mappings.
    pub fn apply_all(mappings: &[IdentifierMapping], set: &mut TripleSet) -> usize {
        let mut replaced = 0;
        for mapping in mappings {
            let n = set.replace_term(&mapping.old, &mapping.new.to_term());
            tracing::trace!(
                old = %mapping.old,
                new = %mapping.new,
                positions = n,
                "replaced identifier"
            );
            replaced += n;
        }
        replaced
    }
}
