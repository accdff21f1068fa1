//! Run lifecycle records and the status snapshot
//!
//! Timing fields are informational only - they feed the operational
//! snapshot, never scheduling decisions. Durations are derived from the
//! timestamps on read, not stored, to avoid clock-skew double bookkeeping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle states of one run
///
/// `Submitted -> Active -> {Completed | Failed}`; the record is created on
/// the schedule request and mutated only by the owning worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum JobStatus {
    /// Queued, not yet started
    Submitted,
    /// Currently executing
    Active,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
}

/// Bookkeeping for one run of one named job
#[derive(Clone, Debug)]
pub struct JobRecord {
    /// The job name (the dedup key)
    pub name: String,
    /// The run instance identifier
    pub run_id: String,
    /// Current lifecycle state
    pub status: JobStatus,
    /// When the schedule request was accepted
    pub submitted_at: DateTime<Utc>,
    /// When execution began
    pub started_at: Option<DateTime<Utc>>,
    /// When execution finished (either way)
    pub completed_at: Option<DateTime<Utc>>,
    /// Error message for failed runs
    pub error: Option<String>,
}

impl JobRecord {
    /// A fresh Submitted record
    pub fn submitted(name: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_id: run_id.into(),
            status: JobStatus::Submitted,
            submitted_at: Utc::now(),
            started_at: None,
            completed_at: None,
            error: None,
        }
    }

    /// Seconds spent waiting: start minus submission, or now minus
    /// submission while still queued
    pub fn waiting_secs(&self, now: DateTime<Utc>) -> i64 {
        let until = self.started_at.unwrap_or(now);
        (until - self.submitted_at).num_seconds()
    }

    /// Seconds spent running: completion minus start, or now minus start
    /// while still active; `None` before the run starts
    pub fn running_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        let started = self.started_at?;
        let until = self.completed_at.unwrap_or(now);
        Some((until - started).num_seconds())
    }

    /// Render for the snapshot
    pub fn describe(&self, now: DateTime<Utc>) -> RunDescription {
        RunDescription {
            name: self.name.clone(),
            run_id: self.run_id.clone(),
            status: self.status,
            submitted_at: self.submitted_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
            waiting_secs: self.waiting_secs(now),
            running_secs: self.running_secs(now),
            error: self.error.clone(),
        }
    }
}

/// One run as exposed by the snapshot
#[derive(Clone, Debug, Serialize)]
pub struct RunDescription {
    /// Job name
    pub name: String,
    /// Run instance identifier
    pub run_id: String,
    /// Lifecycle state at snapshot time
    pub status: JobStatus,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
    /// Start timestamp, if started
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp, if finished
    pub completed_at: Option<DateTime<Utc>>,
    /// Derived waiting duration
    pub waiting_secs: i64,
    /// Derived running duration
    pub running_secs: Option<i64>,
    /// Error message for failed runs
    pub error: Option<String>,
}

/// Read-only diagnostic view over the worker's bookkeeping
#[derive(Clone, Debug, Serialize)]
pub struct JobStatusSnapshot {
    /// Names of all registered jobs
    pub registered: Vec<String>,
    /// Currently executing runs
    pub running: Vec<RunDescription>,
    /// Queued runs not yet started
    pub waiting: Vec<RunDescription>,
    /// Recent failed runs (bounded history)
    pub failed: Vec<RunDescription>,
    /// Recent completed runs (bounded history)
    pub completed: Vec<RunDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn waiting_duration_is_derived() {
        let mut record = JobRecord::submitted("typeCoercion", "typeCoercion_abcd1234");
        let now = record.submitted_at + Duration::seconds(30);
        assert_eq!(record.waiting_secs(now), 30);

        record.started_at = Some(record.submitted_at + Duration::seconds(10));
        assert_eq!(record.waiting_secs(now), 10);
    }

    #[test]
    fn running_duration_requires_a_start() {
        let mut record = JobRecord::submitted("typeCoercion", "typeCoercion_abcd1234");
        let now = record.submitted_at + Duration::seconds(30);
        assert_eq!(record.running_secs(now), None);

        record.started_at = Some(record.submitted_at + Duration::seconds(5));
        assert_eq!(record.running_secs(now), Some(25));

        record.completed_at = Some(record.submitted_at + Duration::seconds(12));
        assert_eq!(record.running_secs(now), Some(7));
    }

    #[test]
    fn snapshot_serializes() {
        let record = JobRecord::submitted("detectDuplicates", "detectDuplicates_abcd1234");
        let snapshot = JobStatusSnapshot {
            registered: vec!["detectDuplicates".into()],
            running: vec![],
            waiting: vec![record.describe(Utc::now())],
            failed: vec![],
            completed: vec![],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["waiting"][0]["name"], "detectDuplicates");
        assert_eq!(json["waiting"][0]["status"], "Submitted");
    }
}
