//! Namespace-aware RDF triple model
//!
//! This crate provides the types the normalization pipeline and the
//! consolidation jobs operate on: terms, triples, and the `TripleSet`
//! collection an incoming write is staged in before it reaches the store.
//!
//! # Design notes
//!
//! - **Expanded IRIs only** - terms always carry the full IRI; prefix
//!   compaction is a writer concern. The prefix map travels with the
//!   `TripleSet` so writers can reproduce header information.
//! - **Bag semantics by default** - a `TripleSet` is `Vec`-backed and keeps
//!   duplicates until `dedupe()` is called explicitly.
//! - **Fragments** - the consolidation jobs work on fragments, the triples
//!   sharing one subject. `TripleSet::fragments()` performs the grouping.

mod fragment;
mod set;
mod term;
mod triple;

pub use fragment::Fragment;
pub use set::TripleSet;
pub use term::{BlankId, Term};
pub use triple::Triple;
