//! Fragment role classification
//!
//! Role typing detects what each fragment in a set *is*:
//!
//! - **Individuals** carry a characteristic property inducing uniqueness
//!   (a label, an identifier) and stand on their own.
//! - **Classifiers** are concepts used to categorize individuals; their
//!   declared type is in a fixed classifier-type set.
//! - **Embedded** fragments are sub-structures with no independent
//!   identity - the fallback when neither check matches.
//!
//! Checks run in that fixed precedence (classifier before individual before
//! embedded), so the roles are mutually exclusive by construction. Exactly
//! one role triple is appended per subject; subjects already carrying a
//! role are left untouched, which makes repeated application a no-op.

use crate::error::Result;
use tessera_core::SessionContext;
use tessera_graph::{Term, Triple, TripleSet};
use tessera_vocab::{local, rdf, CLASSIFICATION_PROPERTIES, CLASSIFIER_TYPES};

/// The role assigned to a fragment's subject
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FragmentRole {
    /// Independent identity (characteristic property present)
    Individual,
    /// Concept used to categorize individuals
    Classifier,
    /// Sub-structure without independent identity
    Embedded,
}

impl FragmentRole {
    /// The role's type IRI
    pub fn iri(&self) -> &'static str {
        match self {
            FragmentRole::Individual => local::TYPE_INDIVIDUAL,
            FragmentRole::Classifier => local::TYPE_CLASSIFIER,
            FragmentRole::Embedded => local::TYPE_EMBEDDED,
        }
    }

    /// All role type IRIs
    pub fn all_iris() -> [&'static str; 3] {
        [
            local::TYPE_INDIVIDUAL,
            local::TYPE_CLASSIFIER,
            local::TYPE_EMBEDDED,
        ]
    }
}

/// Appends one role-typing triple per subject
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeClassifier;

impl TypeClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Append the missing role triples to the set
    pub fn apply(&self, mut set: TripleSet, _ctx: &SessionContext) -> Result<TripleSet> {
        let additions = self.role_statements(&set);
        if !additions.is_empty() {
            tracing::debug!(count = additions.len(), "assigned fragment roles");
            set.extend(additions);
        }
        Ok(set)
    }

    /// The role triples that `apply` would add, without mutating the set
    ///
    /// Subjects already carrying a role type produce nothing.
    pub fn role_statements(&self, set: &TripleSet) -> Vec<Triple> {
        set.subjects()
            .into_iter()
            .filter(|subject| !Self::has_role(set, subject))
            .map(|subject| {
                let role = Self::classify(set, &subject);
                tracing::trace!(subject = %subject, role = ?role, "fragment classified");
                Triple::new(subject, Term::iri(rdf::TYPE), Term::iri(role.iri()))
            })
            .collect()
    }

    /// Classifier check precedes individual check precedes the embedded
    /// fallback
    fn classify(set: &TripleSet, subject: &Term) -> FragmentRole {
        let is_classifier = CLASSIFIER_TYPES
            .iter()
            .any(|ty| set.contains(Some(subject), Some(rdf::TYPE), Some(&Term::iri(*ty))));
        if is_classifier {
            return FragmentRole::Classifier;
        }

        let has_characteristic = CLASSIFICATION_PROPERTIES
            .iter()
            .any(|p| set.first_object(subject, p).is_some());
        if has_characteristic {
            return FragmentRole::Individual;
        }

        FragmentRole::Embedded
    }

    fn has_role(set: &TripleSet, subject: &Term) -> bool {
        FragmentRole::all_iris()
            .iter()
            .any(|role| set.contains(Some(subject), Some(rdf::TYPE), Some(&Term::iri(*role))))
    }
}
