//! # Tessera Transform
//!
//! The rewriting passes an incoming triple set goes through before it is
//! committed, and the pipeline that runs them in strict registration order:
//!
//! - [`Skolemizer`] - replaces blank nodes with minted local identifiers
//! - [`GlobalIdentifierRewriter`] - replaces foreign IRIs with reproducible
//!   local identifiers, preserving the original as provenance
//! - [`TypeClassifier`] - tags each fragment with its role (individual,
//!   classifier, or embedded)
//!
//! Steps are a closed tagged union ([`TransformStep`]); the pipeline is an
//! ordered list of them constructed once at startup. An error in any step
//! aborts the whole run - no partially rewritten set ever reaches the
//! store layer.

pub mod classify;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod rewrite;
pub mod skolemize;

pub use classify::{FragmentRole, TypeClassifier};
pub use error::{Result, TransformError};
pub use mapping::IdentifierMapping;
pub use pipeline::{TransformPipeline, TransformStep};
pub use rewrite::GlobalIdentifierRewriter;
pub use skolemize::Skolemizer;
