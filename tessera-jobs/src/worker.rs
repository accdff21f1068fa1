//! Job scheduling and the single worker consumer
//!
//! Producers hold a [`JobScheduler`] handle; the [`JobWorker`] owns the
//! receiving end of a bounded queue and is the only place that mutates run
//! records. A named job is a singleton unit of work: scheduling a name that
//! is already Submitted or Active is a silently-dropped no-op (debug log
//! only), so bursts of identical requests collapse to one run.
//!
//! Different job names run fully concurrently as spawned tasks; the shared
//! state map guarded by a mutex is the single synchronization point, and
//! both success and failure clear a name's entry - a failed run is never
//! left stuck active.

use crate::config::JobWorkerConfig;
use crate::consolidation::ConsolidationJob;
use crate::error::JobError;
use crate::lifecycle::{JobRecord, JobStatus, JobStatusSnapshot};
use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tessera_core::{GraphStore, LocalIdentifier, SessionContext};
use tessera_vocab::local;
use tokio::sync::{mpsc, Mutex};
use tracing::Instrument;

/// One queued schedule request
#[derive(Debug)]
struct QueueEntry {
    name: String,
    ctx: SessionContext,
}

/// Shared bookkeeping: pending runs keyed by name, bounded histories
#[derive(Debug, Default)]
struct WorkerState {
    /// Submitted and Active runs, keyed by job name (the dedup set)
    pending: BTreeMap<String, JobRecord>,
    completed: VecDeque<JobRecord>,
    failed: VecDeque<JobRecord>,
}

struct WorkerInner<S> {
    store: Arc<S>,
    jobs: Vec<ConsolidationJob>,
    state: Mutex<WorkerState>,
    config: JobWorkerConfig,
}

/// Producer-side handle: schedule jobs, read the status snapshot
pub struct JobScheduler<S> {
    inner: Arc<WorkerInner<S>>,
    tx: mpsc::Sender<QueueEntry>,
}

impl<S> Clone for JobScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl<S: GraphStore + 'static> JobScheduler<S> {
    /// Request a run of the named job. Fire-and-forget: never blocks on
    /// the job's completion, never reports dedup drops to the caller.
    pub async fn schedule(&self, name: &str, ctx: SessionContext) {
        if !self.inner.jobs.iter().any(|job| job.name() == name) {
            tracing::warn!(job = name, "job requested but not registered");
            return;
        }

        let run_id = mint_run_id(name);
        {
            let mut state = self.inner.state.lock().await;
            if let Some(existing) = state.pending.get(name) {
                tracing::debug!(
                    job = name,
                    run = %existing.run_id,
                    status = ?existing.status,
                    "job already pending, skipping scheduled run"
                );
                return;
            }
            state
                .pending
                .insert(name.to_string(), JobRecord::submitted(name, run_id.clone()));
        }

        let entry = QueueEntry {
            name: name.to_string(),
            ctx,
        };
        if let Err(e) = self.tx.try_send(entry) {
            tracing::warn!(job = name, error = %e, "schedule queue full, dropping request");
            let mut state = self.inner.state.lock().await;
            state.pending.remove(name);
            return;
        }
        tracing::debug!(job = name, run = %run_id, "job submitted");
    }

    /// Names of all registered jobs
    pub fn registered(&self) -> Vec<&'static str> {
        self.inner.jobs.iter().map(ConsolidationJob::name).collect()
    }

    /// Point-in-time diagnostic view of all runs
    pub async fn status_snapshot(&self) -> JobStatusSnapshot {
        let now = Utc::now();
        let state = self.inner.state.lock().await;
        JobStatusSnapshot {
            registered: self
                .inner
                .jobs
                .iter()
                .map(|job| job.name().to_string())
                .collect(),
            running: state
                .pending
                .values()
                .filter(|r| r.status == JobStatus::Active)
                .map(|r| r.describe(now))
                .collect(),
            waiting: state
                .pending
                .values()
                .filter(|r| r.status == JobStatus::Submitted)
                .map(|r| r.describe(now))
                .collect(),
            failed: state.failed.iter().map(|r| r.describe(now)).collect(),
            completed: state.completed.iter().map(|r| r.describe(now)).collect(),
        }
    }
}

/// The single queue consumer
pub struct JobWorker<S> {
    inner: Arc<WorkerInner<S>>,
    rx: mpsc::Receiver<QueueEntry>,
}

impl<S: GraphStore + 'static> JobWorker<S> {
    /// Wire up a scheduler/worker pair over a bounded queue
    pub fn new(
        store: Arc<S>,
        jobs: Vec<ConsolidationJob>,
        config: JobWorkerConfig,
    ) -> (JobScheduler<S>, JobWorker<S>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let inner = Arc::new(WorkerInner {
            store,
            jobs,
            state: Mutex::new(WorkerState::default()),
            config,
        });
        (
            JobScheduler {
                inner: inner.clone(),
                tx,
            },
            JobWorker { inner, rx },
        )
    }

    /// Consume schedule requests until every scheduler handle is dropped.
    ///
    /// Each request is spawned as its own task, so differently named jobs
    /// run concurrently; per-name exclusion is enforced at schedule time.
    pub async fn run(mut self) {
        tracing::debug!(jobs = self.inner.jobs.len(), "job worker started");
        while let Some(entry) = self.rx.recv().await {
            let inner = self.inner.clone();
            tokio::spawn(async move {
                inner.execute(entry).await;
            });
        }
        tracing::debug!("job worker stopped");
    }
}

impl<S: GraphStore + 'static> WorkerInner<S> {
    async fn execute(self: Arc<Self>, entry: QueueEntry) {
        let run_id = {
            let mut state = self.state.lock().await;
            let Some(record) = state.pending.get_mut(&entry.name) else {
                // dropped between submission and execution (queue overflow cleanup)
                return;
            };
            record.status = JobStatus::Active;
            record.started_at = Some(Utc::now());
            record.run_id.clone()
        };

        let span = tracing::info_span!("job_run", job = %entry.name, run = %run_id);
        let result = async {
            tracing::debug!("starting job");
            match self.jobs.iter().find(|job| job.name() == entry.name) {
                Some(job) => job.run(self.store.as_ref(), &entry.ctx).await,
                None => Err(JobError::UnknownJob(entry.name.clone())),
            }
        }
        .instrument(span)
        .await;

        let mut state = self.state.lock().await;
        let Some(mut record) = state.pending.remove(&entry.name) else {
            return;
        };
        record.completed_at = Some(Utc::now());
        match result {
            Ok(report) => {
                record.status = JobStatus::Completed;
                tracing::debug!(
                    job = %entry.name,
                    run = %run_id,
                    processed = report.fragments_processed,
                    failed = report.fragments_failed,
                    "completed job"
                );
                push_bounded(&mut state.completed, record, self.config.completed_history);
            }
            Err(e) => {
                record.status = JobStatus::Failed;
                record.error = Some(e.to_string());
                tracing::warn!(job = %entry.name, run = %run_id, error = %e, "failed job");
                push_bounded(&mut state.failed, record, self.config.failed_history);
            }
        }
    }
}

fn push_bounded(history: &mut VecDeque<JobRecord>, record: JobRecord, cap: usize) {
    history.push_front(record);
    history.truncate(cap);
}

/// Run ids combine the job name with a random local key, so every run is
/// individually addressable in logs and the snapshot
fn mint_run_id(name: &str) -> String {
    format!("{}_{}", name, LocalIdentifier::random(local::ENTITIES).local())
}
