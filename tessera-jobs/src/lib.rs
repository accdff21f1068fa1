//! # Tessera Jobs
//!
//! Asynchronous background consolidation over the whole store: the same
//! kind of rewriting the inbound pipeline performs, packaged as named,
//! idempotent jobs with an at-most-one-concurrent-execution-per-name
//! guarantee.
//!
//! Producers (admin endpoints, timers) call [`JobScheduler::schedule`];
//! requests flow over a bounded queue to the single [`JobWorker`] consumer,
//! which deduplicates by job name, spawns the run, and records its
//! lifecycle. [`JobScheduler::status_snapshot`] exposes the in-memory
//! bookkeeping for an operational endpoint; nothing here survives a
//! process restart, by design.

pub mod config;
pub mod consolidation;
pub mod error;
pub mod lifecycle;
pub mod worker;

pub use config::JobWorkerConfig;
pub use consolidation::{
    ConsolidationJob, DetectDuplicates, JobReport, ReplaceGlobalIdentifiers, TypeCoercion,
};
pub use error::{JobError, Result};
pub use lifecycle::{JobRecord, JobStatus, JobStatusSnapshot, RunDescription};
pub use worker::{JobScheduler, JobWorker};
