//! Worker configuration

/// Configuration for the job worker and its queue
#[derive(Clone, Debug)]
pub struct JobWorkerConfig {
    /// Capacity of the bounded schedule queue. A full queue drops further
    /// requests (fire-and-forget semantics make this safe).
    ///
    /// Default: 16
    pub queue_capacity: usize,

    /// How many completed run records the snapshot retains.
    ///
    /// Default: 5
    pub completed_history: usize,

    /// How many failed run records the snapshot retains.
    ///
    /// Default: 10
    pub failed_history: usize,
}

impl Default for JobWorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 16,
            completed_history: 5,
            failed_history: 10,
        }
    }
}
