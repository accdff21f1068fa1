//! In-memory implementation of the store collaborator
//!
//! The production store lives elsewhere; this crate provides the
//! implementation every test suite (and embedded experimentation) runs
//! against: a lock-guarded triple vec with set semantics and commit-atomic
//! transactions.
//!
//! An optional per-query delay makes run timing observable in scheduler
//! tests without touching the worker's logic.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use std::time::Duration;
use tessera_core::{
    Authority, FragmentPattern, FragmentStream, GraphStore, LocalIdentifier, SessionContext,
    StoreError, StoreTransaction,
};
use tessera_graph::{Fragment, Term, Triple, TripleSet};
use tessera_vocab::{local, rdf};

/// Lock-guarded in-memory triple store
#[derive(Debug, Default)]
pub struct MemoryStore {
    triples: RwLock<Vec<Triple>>,
    query_delay: Option<Duration>,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the given triples
    pub fn seeded(triples: impl IntoIterator<Item = Triple>) -> Self {
        Self {
            triples: RwLock::new(triples.into_iter().collect()),
            query_delay: None,
        }
    }

    /// Delay every query by the given duration.
    ///
    /// Lets scheduler tests observe a run mid-flight; no effect on
    /// semantics.
    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = Some(delay);
        self
    }

    /// A copy of the current contents
    pub fn snapshot(&self) -> TripleSet {
        self.triples.read().iter().cloned().collect()
    }

    /// Number of stored triples
    pub fn len(&self) -> usize {
        self.triples.read().len()
    }

    /// True if the store holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.read().is_empty()
    }

    fn fragments_matching(&self, pattern: &FragmentPattern) -> Vec<Fragment> {
        let triples = self.triples.read();
        let subjects = distinct_subjects(&triples);

        match pattern {
            FragmentPattern::ExternalSubjects {
                local_namespace,
                limit,
            } => subjects
                .iter()
                .filter(|s| {
                    s.as_iri()
                        .map(|iri| !LocalIdentifier::is_local(iri, local_namespace))
                        .unwrap_or(false)
                })
                .take(*limit)
                .map(|s| fragment_of(&triples, s))
                .collect(),

            FragmentPattern::UntypedSubjects { limit } => subjects
                .iter()
                .filter(|s| !has_role_type(&triples, s))
                .take(*limit)
                .map(|s| fragment_of(&triples, s))
                .collect(),

            FragmentPattern::SharedCharacteristic { property, limit } => {
                // duplicate candidates only: (declared type, value) pairs
                // carried by two or more subjects
                let mut by_key: Vec<((String, String), Vec<&Term>)> = Vec::new();
                for s in &subjects {
                    let fragment = fragment_of(&triples, s);
                    let (Some(ty), Some(value)) = (
                        fragment.declared_type().map(|t| t.lexical().to_string()),
                        fragment.first_object(property).map(|v| v.lexical().to_string()),
                    ) else {
                        continue;
                    };
                    let key = (ty, value);
                    match by_key.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, members)) => members.push(s),
                        None => by_key.push((key, vec![s])),
                    }
                }
                by_key
                    .into_iter()
                    .filter(|(_, members)| members.len() > 1)
                    .flat_map(|(_, members)| members)
                    .take(*limit)
                    .map(|s| fragment_of(&triples, s))
                    .collect()
            }

            FragmentPattern::ReferencesTo { target } => subjects
                .iter()
                .filter(|s| triples.iter().any(|t| t.s == **s && t.o == *target))
                .map(|s| fragment_of(&triples, s))
                .collect(),

            FragmentPattern::BySubject { subject } => {
                let fragment = fragment_of(&triples, subject);
                if fragment.is_empty() {
                    Vec::new()
                } else {
                    vec![fragment]
                }
            }
        }
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn query(
        &self,
        pattern: FragmentPattern,
        ctx: &SessionContext,
    ) -> Result<FragmentStream, StoreError> {
        if !ctx.has_authority(Authority::Reader) {
            return Err(StoreError::InsufficientAuthority);
        }
        if let Some(delay) = self.query_delay {
            tokio::time::sleep(delay).await;
        }

        let fragments = self.fragments_matching(&pattern);
        tracing::trace!(?pattern, count = fragments.len(), "memory store query");
        Ok(stream::iter(fragments.into_iter().map(Ok)).boxed())
    }

    async fn begin(&self, ctx: &SessionContext) -> Result<StoreTransaction, StoreError> {
        if !ctx.has_authority(Authority::Contributor) {
            return Err(StoreError::InsufficientAuthority);
        }
        Ok(StoreTransaction::new())
    }

    async fn commit(&self, tx: StoreTransaction) -> Result<(), StoreError> {
        let mut triples = self.triples.write();
        // removals before inserts, set semantics throughout
        triples.retain(|t| !tx.removals().contains(t));
        for insert in tx.inserts() {
            if !triples.contains(insert) {
                triples.push(insert.clone());
            }
        }
        tracing::trace!(
            tx = tx.id(),
            removed = tx.removals().len(),
            inserted = tx.inserts().len(),
            "memory store commit"
        );
        Ok(())
    }

    async fn rollback(&self, tx: StoreTransaction) -> Result<(), StoreError> {
        tracing::trace!(tx = tx.id(), "memory store rollback");
        Ok(())
    }
}

fn distinct_subjects(triples: &[Triple]) -> Vec<Term> {
    let mut seen = Vec::new();
    for t in triples {
        if !seen.contains(&t.s) {
            seen.push(t.s.clone());
        }
    }
    seen
}

fn fragment_of(triples: &[Triple], subject: &Term) -> Fragment {
    Fragment::new(
        subject.clone(),
        triples.iter().filter(|t| t.s == *subject).cloned().collect(),
    )
}

fn has_role_type(triples: &[Triple], subject: &Term) -> bool {
    let roles = [
        local::TYPE_INDIVIDUAL,
        local::TYPE_CLASSIFIER,
        local::TYPE_EMBEDDED,
    ];
    triples.iter().any(|t| {
        t.s == *subject
            && t.p.as_iri() == Some(rdf::TYPE)
            && t.o.as_iri().map(|o| roles.contains(&o)).unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use tessera_vocab::rdfs;

    fn label(s: &Term, text: &str) -> Triple {
        Triple::new(s.clone(), Term::iri(rdfs::LABEL), Term::string(text))
    }

    #[tokio::test]
    async fn commit_applies_removals_then_inserts() {
        let s = Term::iri("urn:tessera:e:aaaaaaaa");
        let store = MemoryStore::seeded([label(&s, "old")]);
        let ctx = SessionContext::system();

        let mut tx = store.begin(&ctx).await.unwrap();
        tx.remove(label(&s, "old"));
        tx.insert(label(&s, "new"));
        store.commit(tx).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains(Some(&s), Some(rdfs::LABEL), Some(&Term::string("new"))));
    }

    #[tokio::test]
    async fn rollback_leaves_contents_untouched() {
        let s = Term::iri("urn:tessera:e:aaaaaaaa");
        let store = MemoryStore::seeded([label(&s, "kept")]);
        let ctx = SessionContext::system();

        let mut tx = store.begin(&ctx).await.unwrap();
        tx.remove(label(&s, "kept"));
        store.rollback(tx).await.unwrap();

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn external_subjects_pattern_skips_local_identifiers() {
        let foreign = Term::iri("http://example.org/x");
        let local_id = Term::iri("urn:tessera:e:abcd1234");
        let store = MemoryStore::seeded([label(&foreign, "f"), label(&local_id, "l")]);

        let fragments: Vec<Fragment> = store
            .query(
                FragmentPattern::ExternalSubjects {
                    local_namespace: local::ENTITIES.to_string(),
                    limit: 10,
                },
                &SessionContext::system(),
            )
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].subject, foreign);
    }

    #[tokio::test]
    async fn untyped_subjects_pattern_skips_role_typed_fragments() {
        let typed = Term::iri("urn:tessera:e:aaaaaaaa");
        let untyped = Term::iri("urn:tessera:e:bbbbbbbb");
        let store = MemoryStore::seeded([
            label(&typed, "t"),
            Triple::new(
                typed.clone(),
                Term::iri(rdf::TYPE),
                Term::iri(local::TYPE_INDIVIDUAL),
            ),
            label(&untyped, "u"),
        ]);

        let fragments: Vec<Fragment> = store
            .query(
                FragmentPattern::UntypedSubjects { limit: 10 },
                &SessionContext::system(),
            )
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].subject, untyped);
    }

    #[tokio::test]
    async fn by_subject_returns_one_fragment_or_none() {
        let s = Term::iri("urn:tessera:e:aaaaaaaa");
        let store = MemoryStore::seeded([label(&s, "present")]);
        let ctx = SessionContext::system();

        let found: Vec<Fragment> = store
            .query(FragmentPattern::BySubject { subject: s.clone() }, &ctx)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject, s);

        let missing: Vec<Fragment> = store
            .query(
                FragmentPattern::BySubject {
                    subject: Term::iri("urn:tessera:e:zzzzzzzz"),
                },
                &ctx,
            )
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn guests_cannot_query_or_begin() {
        let store = MemoryStore::new();
        let guest = SessionContext::guest();

        assert!(matches!(
            store
                .query(FragmentPattern::UntypedSubjects { limit: 1 }, &guest)
                .await,
            Err(StoreError::InsufficientAuthority)
        ));
        assert!(matches!(
            store.begin(&guest).await,
            Err(StoreError::InsufficientAuthority)
        ));
    }
}
