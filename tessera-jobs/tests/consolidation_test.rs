//! Consolidation job bodies against the in-memory store

use std::sync::Arc;
use tessera_core::{LocalIdentifier, SessionContext};
use tessera_graph::{Term, Triple};
use tessera_jobs::ConsolidationJob;
use tessera_memory::MemoryStore;
use tessera_vocab::{local, rdf, rdfs, sdo};

fn triple(s: &Term, p: &str, o: Term) -> Triple {
    Triple::new(s.clone(), Term::iri(p), o)
}

fn find_job(name: &str) -> ConsolidationJob {
    ConsolidationJob::standard_set()
        .into_iter()
        .find(|job| job.name() == name)
        .unwrap()
}

#[tokio::test]
async fn replace_global_identifiers_rewrites_foreign_subjects() {
    let foreign = Term::iri("http://example.org/x");
    let store = Arc::new(MemoryStore::seeded([
        triple(&foreign, rdf::TYPE, Term::iri("https://schema.org/VideoObject")),
        triple(&foreign, rdfs::LABEL, Term::string("entity x")),
    ]));

    let report = find_job("replaceGlobalIdentifiers")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 1);
    assert_eq!(report.fragments_failed, 0);

    let snapshot = store.snapshot();
    // foreign IRI no longer appears as subject
    assert!(!snapshot
        .subjects()
        .iter()
        .any(|s| s.as_iri() == Some("http://example.org/x")));

    // exactly one provenance triple points back to it
    let provenance: Vec<_> = snapshot
        .iter()
        .filter(|t| t.p.as_iri() == Some(local::SOURCE_IDENTIFIER))
        .collect();
    assert_eq!(provenance.len(), 1);
    assert_eq!(provenance[0].o, foreign);
    assert!(LocalIdentifier::is_local(
        provenance[0].s.as_iri().unwrap(),
        local::ENTITIES
    ));

    // idempotent: a second run finds no candidates
    let report = find_job("replaceGlobalIdentifiers")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 0);
}

#[tokio::test]
async fn detect_duplicates_merges_and_redirects() {
    let term_a = Term::iri("urn:tessera:e:aaaaaaaa");
    let term_b = Term::iri("urn:tessera:e:bbbbbbbb");
    let video = Term::iri("urn:tessera:e:video111");
    let store = Arc::new(MemoryStore::seeded([
        triple(&term_a, rdf::TYPE, Term::iri(sdo::DEFINED_TERM)),
        triple(&term_a, rdfs::LABEL, Term::string("Term 1")),
        triple(&term_b, rdf::TYPE, Term::iri(sdo::DEFINED_TERM)),
        triple(&term_b, rdfs::LABEL, Term::string("Term 1")),
        triple(&video, "https://schema.org/hasDefinedTerm", term_b.clone()),
    ]));

    let report = find_job("detectDuplicates")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 1);

    let snapshot = store.snapshot();
    // the lexicographically least identifier survives
    assert!(snapshot.contains(Some(&term_a), Some(rdfs::LABEL), None));
    assert!(!snapshot.contains(Some(&term_b), None, None));

    // the video's reference was redirected to the survivor
    assert!(snapshot.contains(
        Some(&video),
        Some("https://schema.org/hasDefinedTerm"),
        Some(&term_a)
    ));

    // re-running after a successful merge is a no-op
    let report = find_job("detectDuplicates")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 0);
    assert_eq!(store.snapshot().len(), snapshot.len());
}

#[tokio::test]
async fn type_coercion_types_untyped_fragments_idempotently() {
    let individual = Term::iri("urn:tessera:e:aaaaaaaa");
    let concept = Term::iri("urn:tessera:e:bbbbbbbb");
    let embedded = Term::iri("urn:tessera:e:cccccccc");
    let store = Arc::new(MemoryStore::seeded([
        triple(&individual, rdfs::LABEL, Term::string("an entity")),
        triple(&concept, rdf::TYPE, Term::iri(sdo::DEFINED_TERM)),
        triple(&embedded, "http://example.org/width", Term::string("640")),
    ]));

    let report = find_job("typeCoercion")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 3);

    let snapshot = store.snapshot();
    let role = |s: &Term, role_iri: &str| {
        snapshot.contains(Some(s), Some(rdf::TYPE), Some(&Term::iri(role_iri)))
    };
    assert!(role(&individual, local::TYPE_INDIVIDUAL));
    assert!(role(&concept, local::TYPE_CLASSIFIER));
    assert!(role(&embedded, local::TYPE_EMBEDDED));

    // running twice yields the same role triples both times
    let before = store.snapshot().len();
    let report = find_job("typeCoercion")
        .run(store.as_ref(), &SessionContext::system())
        .await
        .unwrap();
    assert_eq!(report.fragments_processed, 0);
    assert_eq!(store.snapshot().len(), before);
}

#[tokio::test]
async fn jobs_require_system_authority() {
    let store = Arc::new(MemoryStore::new());
    let result = find_job("typeCoercion")
        .run(store.as_ref(), &SessionContext::guest())
        .await;
    assert!(result.is_err());
}
