//! A single RDF statement

use crate::Term;
use serde::{Deserialize, Serialize};

/// Subject-predicate-object statement
///
/// Field order gives SPO lexicographic ordering via the derived `Ord`,
/// which `TripleSet::sort` relies on for deterministic output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject (IRI or blank node)
    pub s: Term,
    /// Predicate (always an IRI)
    pub p: Term,
    /// Object (IRI, blank node, or literal)
    pub o: Term,
}

impl Triple {
    /// Create a triple from its components
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }

    /// True if the given term occurs in subject or object position
    pub fn mentions(&self, term: &Term) -> bool {
        self.s == *term || self.o == *term
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_checks_subject_and_object() {
        let b = Term::blank("n");
        let t = Triple::new(b.clone(), Term::iri("http://p"), Term::string("v"));
        assert!(t.mentions(&b));
        assert!(!t.mentions(&Term::iri("http://p")));
    }
}
