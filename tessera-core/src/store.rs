//! Store collaborator interface
//!
//! The triple store (storage, indexing, query execution) is supplied by an
//! external collaborator. This core consumes it through the narrow
//! [`GraphStore`] trait: pattern queries streaming back fragments, and
//! all-or-nothing transactions staged in a [`StoreTransaction`].
//!
//! A transaction object is owned by exactly one pipeline or job run and is
//! never shared across concurrent callers.

use crate::error::StoreError;
use crate::identifier::LocalIdentifier;
use crate::session::SessionContext;
use async_trait::async_trait;
use futures::stream::BoxStream;
use tessera_graph::{Fragment, Term, Triple};
use tessera_vocab::local;

/// Stream of fragments produced by a pattern query
pub type FragmentStream = BoxStream<'static, Result<Fragment, StoreError>>;

/// The candidate queries the consolidation jobs issue
///
/// Patterns describe *which fragments* to load; how they are evaluated
/// (SPARQL, indexes, scans) is the collaborator's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentPattern {
    /// Fragments whose subject IRI is not a local identifier under the
    /// given namespace
    ExternalSubjects {
        /// The local entities namespace
        local_namespace: String,
        /// Maximum number of fragments per batch
        limit: usize,
    },

    /// Fragments whose subject carries none of the local role types
    UntypedSubjects {
        /// Maximum number of fragments per batch
        limit: usize,
    },

    /// Fragments whose (declared type, value of the given property) pair
    /// is shared with at least one other fragment - duplicate candidates
    SharedCharacteristic {
        /// The characteristic property IRI
        property: String,
        /// Maximum number of fragments per batch
        limit: usize,
    },

    /// Fragments containing at least one triple whose object is the target
    ReferencesTo {
        /// The referenced term
        target: Term,
    },

    /// The single fragment for one subject
    BySubject {
        /// The subject term
        subject: Term,
    },
}

/// A staged, all-or-nothing unit of store work
///
/// Created by [`GraphStore::begin`], filled by the caller, then either
/// committed or rolled back. Removals are applied before inserts.
#[derive(Debug)]
pub struct StoreTransaction {
    id: String,
    inserts: Vec<Triple>,
    removals: Vec<Triple>,
}

impl StoreTransaction {
    /// Create an empty transaction with a fresh local transaction id
    pub fn new() -> Self {
        Self {
            id: LocalIdentifier::random(local::TRANSACTIONS).iri(),
            inserts: Vec::new(),
            removals: Vec::new(),
        }
    }

    /// The transaction identifier (a local IRI under the transactions
    /// namespace)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stage a triple for insertion
    pub fn insert(&mut self, triple: Triple) {
        self.inserts.push(triple);
    }

    /// Stage several triples for insertion
    pub fn insert_all(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.inserts.extend(triples);
    }

    /// Stage a triple for removal
    pub fn remove(&mut self, triple: Triple) {
        self.removals.push(triple);
    }

    /// Stage several triples for removal
    pub fn remove_all(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.removals.extend(triples);
    }

    /// Staged insertions
    pub fn inserts(&self) -> &[Triple] {
        &self.inserts
    }

    /// Staged removals
    pub fn removals(&self) -> &[Triple] {
        &self.removals
    }

    /// True if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.removals.is_empty()
    }
}

impl Default for StoreTransaction {
    fn default() -> Self {
        Self::new()
    }
}

/// The store capability this core consumes
///
/// Implementations are free to be remote or embedded; `tessera-memory`
/// provides the in-memory implementation used by tests.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Evaluate a fragment pattern, streaming back matching fragments
    async fn query(
        &self,
        pattern: FragmentPattern,
        ctx: &SessionContext,
    ) -> Result<FragmentStream, StoreError>;

    /// Open a new transaction
    async fn begin(&self, ctx: &SessionContext) -> Result<StoreTransaction, StoreError>;

    /// Apply a staged transaction atomically
    async fn commit(&self, tx: StoreTransaction) -> Result<(), StoreError>;

    /// Discard a staged transaction
    async fn rollback(&self, tx: StoreTransaction) -> Result<(), StoreError>;
}
