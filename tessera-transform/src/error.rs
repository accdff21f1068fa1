//! Transform error types

use thiserror::Error;

/// Transform errors
///
/// Any of these aborts the pipeline run for the current input; the caller
/// sees either the fully rewritten set or an error, never something in
/// between.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Identifier minting failed
    #[error("identifier error: {0}")]
    Identifier(#[from] tessera_core::IdentifierError),

    /// The session lacks the authority to run the pipeline
    #[error("insufficient authority to run transform pipeline")]
    InsufficientAuthority,
}

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
