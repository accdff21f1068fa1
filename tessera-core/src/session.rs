//! Per-request session context
//!
//! A session is assembled once by the (excluded) web layer and passed by
//! value through the pipeline and job call chains. It is immutable: the
//! core consumes it only through the [`SessionContext::has_authority`]
//! gate and the tenant scope label used by store resolution outside this
//! core.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability ladder, ordered from least to most privileged
///
/// The derived `Ord` makes `has_authority` a simple comparison: a granted
/// authority satisfies every requirement at or below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Unauthenticated access
    Guest,
    /// Read-only access
    Reader,
    /// May submit writes through the pipeline
    Contributor,
    /// May administer a tenant's data
    Maintainer,
    /// Internal jobs and system maintenance
    System,
}

/// Immutable authorization context for one request or job run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    granted: Authority,
    scope: Option<Arc<str>>,
}

impl SessionContext {
    /// Create a context with the given authority and no tenant scope
    pub fn new(granted: Authority) -> Self {
        Self {
            granted,
            scope: None,
        }
    }

    /// Context for internal background work
    pub fn system() -> Self {
        Self::new(Authority::System)
    }

    /// Context for unauthenticated access
    pub fn guest() -> Self {
        Self::new(Authority::Guest)
    }

    /// Attach a tenant scope label
    pub fn with_scope(mut self, scope: impl AsRef<str>) -> Self {
        self.scope = Some(Arc::from(scope.as_ref()));
        self
    }

    /// The capability check - the only credential inspection this core
    /// ever performs
    pub fn has_authority(&self, required: Authority) -> bool {
        self.granted >= required
    }

    /// The tenant scope this session addresses, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}
