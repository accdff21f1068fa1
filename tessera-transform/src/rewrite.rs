//! Foreign IRI rewriting
//!
//! Entities submitted with externally set IRIs cannot be addressed through
//! the local API. This step mints a reproducible local identifier for every
//! non-local IRI subject and rewrites all its occurrences, keeping the old
//! IRI as a provenance triple.
//!
//! The new identifier is a checksum of the old one, so repeated imports of
//! the same source data converge on the same local entity. The flip side is
//! accepted behavior, not a defect: two distinct foreign IRIs that happen to
//! collide in the checksum's alphabet-restricted keyspace merge into one
//! local entity. A per-run random salt would prevent that but would break
//! reproducibility, so none is used.

use crate::error::Result;
use crate::mapping::IdentifierMapping;
use std::sync::Arc;
use tessera_core::{LocalIdentifier, SessionContext};
use tessera_graph::{Term, Triple, TripleSet};
use tessera_vocab::local;

/// Replaces foreign IRI subjects with reproducible local identifiers
#[derive(Clone, Debug)]
pub struct GlobalIdentifierRewriter {
    namespace: Arc<str>,
}

impl Default for GlobalIdentifierRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalIdentifierRewriter {
    /// Rewriter minting into the default entities namespace
    pub fn new() -> Self {
        Self {
            namespace: Arc::from(local::ENTITIES),
        }
    }

    /// Rewriter minting into a custom namespace
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            namespace: Arc::from(namespace),
        }
    }

    /// Rewrite every foreign IRI subject in the set
    ///
    /// Emits exactly one provenance triple
    /// `new --srcid--> old` per mapping, after substitution, so the old
    /// identifier survives in object position.
    pub fn apply(&self, mut set: TripleSet, _ctx: &SessionContext) -> Result<TripleSet> {
        let mappings = self.build_mappings(&set)?;
        if mappings.is_empty() {
            return Ok(set);
        }

        IdentifierMapping::apply_all(&mappings, &mut set);
        for mapping in &mappings {
            set.add(Triple::new(
                mapping.new.to_term(),
                Term::iri(local::SOURCE_IDENTIFIER),
                mapping.old.clone(),
            ));
        }
        tracing::debug!(
            count = mappings.len(),
            "replaced global identifiers with local identifiers"
        );
        Ok(set)
    }

    /// One mapping per distinct non-local IRI subject
    fn build_mappings(&self, set: &TripleSet) -> Result<Vec<IdentifierMapping>> {
        set.subjects()
            .into_iter()
            .filter_map(|subject| {
                let iri = subject.as_iri()?;
                if LocalIdentifier::is_local(iri, &self.namespace) {
                    return None;
                }
                Some(
                    LocalIdentifier::reproducible(&self.namespace, &[iri])
                        .map(|id| IdentifierMapping::new(subject.clone(), id)),
                )
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_vocab::rdfs;

    fn ctx() -> SessionContext {
        SessionContext::system()
    }

    #[test]
    fn foreign_subject_is_rewritten_with_provenance() {
        let mut set = TripleSet::new();
        set.add_triple(
            Term::iri("http://example.org/x"),
            Term::iri(rdfs::LABEL),
            Term::string("entity x"),
        );

        let out = GlobalIdentifierRewriter::new().apply(set, &ctx()).unwrap();

        let provenance: Vec<&Triple> = out
            .iter()
            .filter(|t| t.p.as_iri() == Some(local::SOURCE_IDENTIFIER))
            .collect();
        assert_eq!(provenance.len(), 1);
        assert_eq!(provenance[0].o, Term::iri("http://example.org/x"));
        assert!(LocalIdentifier::is_local(
            provenance[0].s.as_iri().unwrap(),
            local::ENTITIES
        ));

        // the label triple now hangs off the new identifier
        assert!(out.contains(Some(&provenance[0].s), Some(rdfs::LABEL), None));
        assert!(!out.contains(Some(&Term::iri("http://example.org/x")), None, None));
    }

    #[test]
    fn rewriting_is_reproducible() {
        let make = || {
            let mut set = TripleSet::new();
            set.add_triple(
                Term::iri("http://example.org/x"),
                Term::iri(rdfs::LABEL),
                Term::string("entity x"),
            );
            GlobalIdentifierRewriter::new().apply(set, &ctx()).unwrap()
        };
        let a = make();
        let b = make();
        assert_eq!(a.subjects(), b.subjects());
    }

    #[test]
    fn object_occurrences_of_mapped_subjects_are_rewritten() {
        let mut set = TripleSet::new();
        set.add_triple(
            Term::iri("http://example.org/x"),
            Term::iri(rdfs::LABEL),
            Term::string("x"),
        );
        set.add_triple(
            Term::iri("http://example.org/y"),
            Term::iri("http://example.org/ref"),
            Term::iri("http://example.org/x"),
        );

        let out = GlobalIdentifierRewriter::new().apply(set, &ctx()).unwrap();

        // x was a subject, so its object occurrence under y's fragment is
        // rewritten as well; only provenance keeps the old IRIs
        for t in out.iter() {
            if t.p.as_iri() == Some(local::SOURCE_IDENTIFIER) {
                continue;
            }
            assert_ne!(t.o, Term::iri("http://example.org/x"));
        }
    }

    #[test]
    fn local_subjects_are_left_alone() {
        let already = LocalIdentifier::reproducible(local::ENTITIES, &["seed"]).unwrap();
        let mut set = TripleSet::new();
        set.add_triple(already.to_term(), Term::iri(rdfs::LABEL), Term::string("local"));

        let out = GlobalIdentifierRewriter::new().apply(set, &ctx()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.subjects(), vec![already.to_term()]);
    }
}
