//! Core error types

use thiserror::Error;

/// Identifier minting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// No content to derive a reproducible identifier from
    #[error("no content to generate reproducible identifier")]
    EmptyInput,
}

/// Store collaborator errors
///
/// The store is external; its failures reach this core as opaque messages.
/// A store error rolls back the in-flight transaction and nothing else.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Pass-through failure from the store collaborator
    #[error("store error: {0}")]
    Store(String),

    /// The session lacks the authority the store operation requires
    #[error("insufficient authority for store operation")]
    InsufficientAuthority,
}

impl StoreError {
    /// Wrap a collaborator failure message
    pub fn store(msg: impl Into<String>) -> Self {
        StoreError::Store(msg.into())
    }
}
