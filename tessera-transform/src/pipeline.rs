//! The ordered transform pipeline
//!
//! Steps are registered once at startup and executed in strict registration
//! order on every run - skolemization must precede global identifier
//! rewriting, which must precede classification, so no reordering is ever
//! permitted. An empty pipeline passes its input through unchanged.

use crate::classify::TypeClassifier;
use crate::error::{Result, TransformError};
use crate::rewrite::GlobalIdentifierRewriter;
use crate::skolemize::Skolemizer;
use tessera_core::{Authority, SessionContext};
use tessera_graph::TripleSet;

/// One registered rewriting pass
///
/// A closed tagged union rather than a trait object: the set of steps is
/// known at compile time and pluggability comes from configuration-driven
/// list construction.
#[derive(Clone, Debug)]
pub enum TransformStep {
    /// Replace blank nodes with local identifiers
    Skolemize(Skolemizer),
    /// Replace foreign IRIs with local identifiers
    RewriteGlobalIds(GlobalIdentifierRewriter),
    /// Append fragment role triples
    Classify(TypeClassifier),
}

impl TransformStep {
    /// Stable step name for logs
    pub fn name(&self) -> &'static str {
        match self {
            TransformStep::Skolemize(_) => "skolemize",
            TransformStep::RewriteGlobalIds(_) => "rewriteGlobalIds",
            TransformStep::Classify(_) => "classify",
        }
    }

    /// Run the step on one set
    pub fn apply(&self, set: TripleSet, ctx: &SessionContext) -> Result<TripleSet> {
        match self {
            TransformStep::Skolemize(step) => step.apply(set, ctx),
            TransformStep::RewriteGlobalIds(step) => step.apply(set, ctx),
            TransformStep::Classify(step) => step.apply(set, ctx),
        }
    }
}

/// An ordered list of transform steps
#[derive(Clone, Debug, Default)]
pub struct TransformPipeline {
    steps: Vec<TransformStep>,
}

impl TransformPipeline {
    /// An empty pipeline (passes input through)
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline with the given steps, in order
    pub fn with_steps(steps: Vec<TransformStep>) -> Self {
        Self { steps }
    }

    /// The standard write path: skolemize, rewrite foreign IRIs, classify
    pub fn standard() -> Self {
        Self::with_steps(vec![
            TransformStep::Skolemize(Skolemizer::new()),
            TransformStep::RewriteGlobalIds(GlobalIdentifierRewriter::new()),
            TransformStep::Classify(TypeClassifier::new()),
        ])
    }

    /// Append a step
    pub fn push(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// The registered steps, in execution order
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Run every step over the set, threading the session context through
    ///
    /// The caller sees either the fully rewritten set or the first step
    /// error - a half-rewritten set is never exposed. Requires contributor
    /// authority.
    pub fn run(&self, set: TripleSet, ctx: &SessionContext) -> Result<TripleSet> {
        if !ctx.has_authority(Authority::Contributor) {
            return Err(TransformError::InsufficientAuthority);
        }

        let span = tracing::debug_span!("pipeline_run", steps = self.steps.len(), triples = set.len());
        let _guard = span.enter();

        let mut current = set;
        for step in &self.steps {
            tracing::trace!(step = step.name(), "applying transform step");
            current = step.apply(current, ctx)?;
        }
        Ok(current)
    }
}
