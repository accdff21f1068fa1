//! Fragments: the triples sharing one subject
//!
//! A fragment is the unit the consolidation jobs load, rewrite, and commit.
//! The store collaborator returns fragments from pattern queries.

use crate::{Term, Triple, TripleSet};
use serde::{Deserialize, Serialize};
use tessera_vocab::rdf;

/// One entity's statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fragment {
    /// The shared subject
    pub subject: Term,
    triples: Vec<Triple>,
}

impl Fragment {
    /// Create a fragment from a subject and its triples
    pub fn new(subject: Term, triples: Vec<Triple>) -> Self {
        Self { subject, triples }
    }

    /// The fragment's triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// True if the fragment holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// The first declared rdf:type, if any
    pub fn declared_type(&self) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.p.as_iri() == Some(rdf::TYPE))
            .map(|t| &t.o)
    }

    /// First object for a predicate IRI within this fragment
    pub fn first_object(&self, predicate: &str) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.p.as_iri() == Some(predicate))
            .map(|t| &t.o)
    }

    /// True if the fragment declares the given rdf:type IRI
    pub fn has_type(&self, type_iri: &str) -> bool {
        self.triples
            .iter()
            .any(|t| t.p.as_iri() == Some(rdf::TYPE) && t.o.as_iri() == Some(type_iri))
    }

    /// Convert into a `TripleSet` for the transform pipeline
    pub fn into_set(self) -> TripleSet {
        self.triples.into_iter().collect()
    }

    /// View as a `TripleSet` without consuming
    pub fn to_set(&self) -> TripleSet {
        self.triples.iter().cloned().collect()
    }
}
