//! Job error types

use thiserror::Error;

/// Errors raised by a job body
///
/// Captured at the worker boundary into the run's Failed record; a
/// background job failure never crashes the process and never blocks
/// other job names.
#[derive(Error, Debug)]
pub enum JobError {
    /// Store collaborator failure
    #[error("store error: {0}")]
    Store(#[from] tessera_core::StoreError),

    /// Transform failure while rewriting a fragment
    #[error("transform error: {0}")]
    Transform(#[from] tessera_transform::TransformError),

    /// The session lacks the authority to run consolidation jobs
    #[error("insufficient authority to run job")]
    InsufficientAuthority,

    /// A run was dispatched for a name no registered job carries
    #[error("job '{0}' is not registered")]
    UnknownJob(String),
}

/// Result type for job operations
pub type Result<T> = std::result::Result<T, JobError>;
