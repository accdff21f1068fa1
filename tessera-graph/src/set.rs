//! The `TripleSet` collection
//!
//! A `TripleSet` is what flows through the transform pipeline: the triples
//! of one request (or one loaded fragment), together with the namespace
//! prefixes the source document declared.

use crate::{Fragment, Term, Triple};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered, namespace-aware collection of triples
///
/// `Vec`-backed with bag semantics; call [`TripleSet::dedupe`] for set
/// semantics and [`TripleSet::sort`] for deterministic SPO ordering.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TripleSet {
    triples: Vec<Triple>,
    /// Prefix mappings carried from parsing, so writers can reproduce
    /// header information (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl TripleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a triple
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// True if the set holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// The triples as a slice
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Consume the set, yielding its triples
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Remove duplicate triples (set semantics), sorting first
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// All distinct subjects, in first-occurrence order
    pub fn subjects(&self) -> Vec<Term> {
        let mut seen = Vec::new();
        for t in &self.triples {
            if !seen.contains(&t.s) {
                seen.push(t.s.clone());
            }
        }
        seen
    }

    /// All distinct blank nodes occurring in subject or object position,
    /// in first-occurrence order
    pub fn blank_nodes(&self) -> Vec<Term> {
        let mut seen = Vec::new();
        for t in &self.triples {
            for term in [&t.s, &t.o] {
                if term.is_blank() && !seen.contains(term) {
                    seen.push(term.clone());
                }
            }
        }
        seen
    }

    /// First object for the given subject and predicate IRI, if any
    pub fn first_object(&self, subject: &Term, predicate: &str) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.s == *subject && t.p.as_iri() == Some(predicate))
            .map(|t| &t.o)
    }

    /// True if a triple (subject, predicate, object) is present; `None`
    /// components act as wildcards
    pub fn contains(&self, subject: Option<&Term>, predicate: Option<&str>, object: Option<&Term>) -> bool {
        self.triples.iter().any(|t| {
            subject.map_or(true, |s| t.s == *s)
                && predicate.map_or(true, |p| t.p.as_iri() == Some(p))
                && object.map_or(true, |o| t.o == *o)
        })
    }

    /// Substitute every subject/object occurrence of `old` with `new`.
    ///
    /// Predicates are never substituted; returns how many term positions
    /// were rewritten.
    pub fn replace_term(&mut self, old: &Term, new: &Term) -> usize {
        let mut replaced = 0;
        for t in &mut self.triples {
            if t.s == *old {
                t.s = new.clone();
                replaced += 1;
            }
            if t.o == *old {
                t.o = new.clone();
                replaced += 1;
            }
        }
        replaced
    }

    /// Drop every triple whose subject is the given term, returning the
    /// number removed
    pub fn remove_subject(&mut self, subject: &Term) -> usize {
        let before = self.triples.len();
        self.triples.retain(|t| t.s != *subject);
        before - self.triples.len()
    }

    /// Group the triples by subject into fragments, preserving the order
    /// in which subjects first appear
    pub fn fragments(&self) -> Vec<Fragment> {
        self.subjects()
            .into_iter()
            .map(|s| self.fragment(&s))
            .collect()
    }

    /// The fragment for one subject (its triples, in set order)
    pub fn fragment(&self, subject: &Term) -> Fragment {
        let triples = self
            .triples
            .iter()
            .filter(|t| t.s == *subject)
            .cloned()
            .collect();
        Fragment::new(subject.clone(), triples)
    }
}

impl IntoIterator for TripleSet {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for TripleSet {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        TripleSet {
            triples: iter.into_iter().collect(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Triple> for TripleSet {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}
