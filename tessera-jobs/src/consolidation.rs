//! The consolidation job bodies
//!
//! Each job is a named, idempotent pass over the whole store: query for
//! candidate fragments, rewrite, commit one transaction per affected
//! fragment. Per-fragment commits bound the blast radius of a failure to
//! that fragment; a failed fragment is rolled back, logged at warn, and
//! counted in the [`JobReport`], while the run itself completes. Only a
//! candidate-query or transaction-setup failure fails the whole run.
//!
//! All bodies require system authority and are safe to re-run: a pass over
//! already-consolidated data finds no candidates and commits nothing.

use crate::error::{JobError, Result};
use futures::TryStreamExt;
use rustc_hash::FxHashMap;
use tessera_core::{Authority, FragmentPattern, GraphStore, SessionContext};
use tessera_graph::{Fragment, Term, Triple};
use tessera_transform::{GlobalIdentifierRewriter, TypeClassifier};
use tessera_vocab::{local, DUPLICATE_DETECTION_PROPERTIES};

/// Outcome counters for one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobReport {
    /// Fragments rewritten and committed
    pub fragments_processed: usize,
    /// Fragments rolled back after an error (run still completes)
    pub fragments_failed: usize,
}

impl JobReport {
    fn processed(&mut self) {
        self.fragments_processed += 1;
    }

    fn failed(&mut self) {
        self.fragments_failed += 1;
    }
}

/// A named, idempotent unit of background work
///
/// The name doubles as the scheduler's dedup key.
#[derive(Clone, Debug)]
pub enum ConsolidationJob {
    /// Replace foreign IRI subjects store-wide
    ReplaceGlobalIdentifiers(ReplaceGlobalIdentifiers),
    /// Merge structurally equivalent fragments
    DetectDuplicates(DetectDuplicates),
    /// Re-apply role classification store-wide
    TypeCoercion(TypeCoercion),
}

impl ConsolidationJob {
    /// The default set of jobs a deployment registers
    pub fn standard_set() -> Vec<ConsolidationJob> {
        vec![
            ConsolidationJob::ReplaceGlobalIdentifiers(ReplaceGlobalIdentifiers::default()),
            ConsolidationJob::DetectDuplicates(DetectDuplicates::default()),
            ConsolidationJob::TypeCoercion(TypeCoercion::default()),
        ]
    }

    /// Stable job name (the dedup key)
    pub fn name(&self) -> &'static str {
        match self {
            ConsolidationJob::ReplaceGlobalIdentifiers(_) => "replaceGlobalIdentifiers",
            ConsolidationJob::DetectDuplicates(_) => "detectDuplicates",
            ConsolidationJob::TypeCoercion(_) => "typeCoercion",
        }
    }

    /// Run the job body against the store
    pub async fn run<S: GraphStore>(&self, store: &S, ctx: &SessionContext) -> Result<JobReport> {
        if !ctx.has_authority(Authority::System) {
            return Err(JobError::InsufficientAuthority);
        }
        match self {
            ConsolidationJob::ReplaceGlobalIdentifiers(job) => job.run(store, ctx).await,
            ConsolidationJob::DetectDuplicates(job) => job.run(store, ctx).await,
            ConsolidationJob::TypeCoercion(job) => job.run(store, ctx).await,
        }
    }
}

async fn collect_batch<S: GraphStore>(
    store: &S,
    pattern: FragmentPattern,
    ctx: &SessionContext,
) -> Result<Vec<Fragment>> {
    let stream = store.query(pattern, ctx).await?;
    Ok(stream.try_collect().await?)
}

// =============================================================================
// ReplaceGlobalIdentifiers
// =============================================================================

/// Store-wide foreign identifier replacement
///
/// Entities that arrived before the inbound rewriter was enabled (or
/// through side channels) still carry external IRIs and cannot be addressed
/// through the local API. This job loads them batch by batch and applies
/// the same rewriting the pipeline performs, one transaction per fragment.
#[derive(Clone, Debug)]
pub struct ReplaceGlobalIdentifiers {
    /// Fragments per candidate batch
    pub batch_limit: usize,
}

impl Default for ReplaceGlobalIdentifiers {
    fn default() -> Self {
        Self { batch_limit: 100 }
    }
}

impl ReplaceGlobalIdentifiers {
    async fn run<S: GraphStore>(&self, store: &S, ctx: &SessionContext) -> Result<JobReport> {
        let rewriter = GlobalIdentifierRewriter::new();
        let mut report = JobReport::default();

        loop {
            let batch = collect_batch(
                store,
                FragmentPattern::ExternalSubjects {
                    local_namespace: local::ENTITIES.to_string(),
                    limit: self.batch_limit,
                },
                ctx,
            )
            .await?;
            if batch.is_empty() {
                break;
            }

            let mut progressed = 0;
            for fragment in &batch {
                match self.rewrite_fragment(store, &rewriter, fragment, ctx).await {
                    Ok(()) => {
                        progressed += 1;
                        report.processed();
                    }
                    Err(e) => {
                        tracing::warn!(
                            subject = %fragment.subject,
                            error = %e,
                            "failed to replace global identifier, fragment rolled back"
                        );
                        report.failed();
                    }
                }
            }
            // persistently failing fragments would otherwise re-match forever
            if progressed == 0 {
                break;
            }
        }

        tracing::debug!(
            processed = report.fragments_processed,
            failed = report.fragments_failed,
            "finished replacing global identifiers"
        );
        Ok(report)
    }

    async fn rewrite_fragment<S: GraphStore>(
        &self,
        store: &S,
        rewriter: &GlobalIdentifierRewriter,
        fragment: &Fragment,
        ctx: &SessionContext,
    ) -> Result<()> {
        let mut tx = store.begin(ctx).await?;
        let rewritten = match rewriter.apply(fragment.to_set(), ctx) {
            Ok(set) => set,
            Err(e) => {
                store.rollback(tx).await?;
                return Err(e.into());
            }
        };
        tx.remove_all(fragment.triples().iter().cloned());
        tx.insert_all(rewritten);
        store.commit(tx).await?;
        Ok(())
    }
}

// =============================================================================
// DetectDuplicates
// =============================================================================

/// Duplicate detection and merge
///
/// Two fragments are duplicates when they share a declared type and the
/// value of one of the duplicate-detection properties. A typical case:
/// the same embedded term uploaded in two separate requests, each request
/// minting its own identifier for it. The lexicographically least
/// identifier survives; every inbound reference to a duplicate is
/// redirected to the survivor, then the duplicate's statements are removed.
///
/// Re-running after a successful merge is a no-op: no group of two or more
/// fragments with a shared (type, value) pair remains.
#[derive(Clone, Debug)]
pub struct DetectDuplicates {
    /// Fragments per candidate batch
    pub batch_limit: usize,
}

impl Default for DetectDuplicates {
    fn default() -> Self {
        Self { batch_limit: 10 }
    }
}

impl DetectDuplicates {
    async fn run<S: GraphStore>(&self, store: &S, ctx: &SessionContext) -> Result<JobReport> {
        let mut report = JobReport::default();

        for property in DUPLICATE_DETECTION_PROPERTIES {
            self.check_property(store, property, ctx, &mut report).await?;
        }

        tracing::debug!(
            merged = report.fragments_processed,
            failed = report.fragments_failed,
            "finished duplicate detection"
        );
        Ok(report)
    }

    async fn check_property<S: GraphStore>(
        &self,
        store: &S,
        property: &str,
        ctx: &SessionContext,
        report: &mut JobReport,
    ) -> Result<()> {
        loop {
            let candidates = collect_batch(
                store,
                FragmentPattern::SharedCharacteristic {
                    property: property.to_string(),
                    limit: self.batch_limit,
                },
                ctx,
            )
            .await?;
            if candidates.is_empty() {
                return Ok(());
            }

            // group by (declared type, shared value); a batch boundary may
            // split a group, leaving singletons for the next round
            let mut groups: FxHashMap<(String, String), Vec<Fragment>> = FxHashMap::default();
            for fragment in candidates {
                let Some(ty) = fragment.declared_type().map(|t| t.lexical().to_string()) else {
                    continue;
                };
                let Some(value) = fragment.first_object(property).map(|v| v.lexical().to_string())
                else {
                    continue;
                };
                groups.entry((ty, value)).or_default().push(fragment);
            }

            let mut merged = 0;
            for ((ty, value), mut group) in groups {
                if group.len() < 2 {
                    continue;
                }
                tracing::trace!(
                    entity_type = %ty,
                    value = %value,
                    count = group.len(),
                    "multiple fragments share type and characteristic value"
                );

                group.sort_by(|a, b| a.subject.cmp(&b.subject));
                let survivor = group[0].subject.clone();
                for duplicate in &group[1..] {
                    match self.merge_into(store, &survivor, duplicate, ctx).await {
                        Ok(()) => {
                            merged += 1;
                            report.processed();
                        }
                        Err(e) => {
                            tracing::warn!(
                                duplicate = %duplicate.subject,
                                survivor = %survivor,
                                error = %e,
                                "failed to merge duplicate"
                            );
                            report.failed();
                        }
                    }
                }
            }
            // only failures or split groups left: stop rather than spin
            if merged == 0 {
                return Ok(());
            }
        }
    }

    /// Redirect inbound references to the survivor, then remove the
    /// duplicate's statements. One transaction per referencing fragment
    /// plus one for the removal.
    async fn merge_into<S: GraphStore>(
        &self,
        store: &S,
        survivor: &Term,
        duplicate: &Fragment,
        ctx: &SessionContext,
    ) -> Result<()> {
        let referencing = collect_batch(
            store,
            FragmentPattern::ReferencesTo {
                target: duplicate.subject.clone(),
            },
            ctx,
        )
        .await?;

        for reference in referencing {
            // the duplicate's own statements are removed below, not relinked
            if reference.subject == duplicate.subject {
                continue;
            }
            let mut tx = store.begin(ctx).await?;
            for triple in reference.triples() {
                if triple.o == duplicate.subject {
                    tx.remove(triple.clone());
                    tx.insert(Triple::new(
                        triple.s.clone(),
                        triple.p.clone(),
                        survivor.clone(),
                    ));
                }
            }
            store.commit(tx).await?;
        }

        let mut tx = store.begin(ctx).await?;
        tx.remove_all(duplicate.triples().iter().cloned());
        store.commit(tx).await?;
        tracing::debug!(duplicate = %duplicate.subject, survivor = %survivor, "merged duplicate");
        Ok(())
    }
}

// =============================================================================
// TypeCoercion
// =============================================================================

/// Store-wide role classification
///
/// Fragments that entered the store before classification was enabled
/// carry no role triple and stay invisible to the entity API. This job
/// finds them and applies the same classifier the pipeline uses.
/// Idempotent: a typed subject never re-matches the candidate query, and
/// the classifier itself skips subjects that already carry a role.
#[derive(Clone, Debug)]
pub struct TypeCoercion {
    /// Fragments per candidate batch
    pub batch_limit: usize,
}

impl Default for TypeCoercion {
    fn default() -> Self {
        Self { batch_limit: 500 }
    }
}

impl TypeCoercion {
    async fn run<S: GraphStore>(&self, store: &S, ctx: &SessionContext) -> Result<JobReport> {
        let classifier = TypeClassifier::new();
        let mut report = JobReport::default();

        loop {
            let batch = collect_batch(
                store,
                FragmentPattern::UntypedSubjects {
                    limit: self.batch_limit,
                },
                ctx,
            )
            .await?;
            if batch.is_empty() {
                break;
            }

            let mut progressed = 0;
            for fragment in &batch {
                let additions = classifier.role_statements(&fragment.to_set());
                if additions.is_empty() {
                    continue;
                }
                match self.commit_roles(store, additions, ctx).await {
                    Ok(()) => {
                        progressed += 1;
                        report.processed();
                    }
                    Err(e) => {
                        tracing::warn!(
                            subject = %fragment.subject,
                            error = %e,
                            "failed to commit role triples"
                        );
                        report.failed();
                    }
                }
            }
            if progressed == 0 {
                break;
            }
        }

        tracing::debug!(
            typed = report.fragments_processed,
            failed = report.fragments_failed,
            "finished type coercion"
        );
        Ok(report)
    }

    async fn commit_roles<S: GraphStore>(
        &self,
        store: &S,
        additions: Vec<Triple>,
        ctx: &SessionContext,
    ) -> Result<()> {
        let mut tx = store.begin(ctx).await?;
        tx.insert_all(additions);
        store.commit(tx).await?;
        Ok(())
    }
}
