//! Routing contract between the selection coordinator and a pluggable router
//!
//! This module defines what a router sees (a [`RoutingSource`] and a list of
//! [`Candidate`]s) and what it may answer (a [`RoutingOutcome`]). How a router
//! reaches its decision is up to the implementation.

pub mod candidate;
pub mod error;
pub mod outcome;
pub mod source;

pub use candidate::{wrap, Candidate};
pub use error::RoutingError;
pub use outcome::RoutingOutcome;
pub use source::{RequestContext, RoutingSource};

use async_trait::async_trait;

/// Pluggable routing decision engine.
///
/// A router picks at most one candidate. It is never required to pick one;
/// returning [`RoutingOutcome::Unmatched`] hands the request to the fallback
/// balancer, while [`RoutingOutcome::Unavailable`] refuses it outright.
///
/// Implementations own their concurrency. The coordinator calls `route` once
/// per selection and shares nothing between calls.
#[async_trait]
pub trait Router: Send + Sync {
    /// Returns router identifier for logging.
    fn name(&self) -> &'static str;

    /// Decide which candidate, if any, should serve the request.
    ///
    /// # Returns
    /// - Ok(outcome) for every legitimate decision, including refusals
    /// - Err(RoutingError) only when the router itself failed
    async fn route(
        &self,
        source: &RoutingSource,
        candidates: &[Candidate],
    ) -> Result<RoutingOutcome, RoutingError>;
}

/// Router with no rules. Always defers to the fallback balancer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRouter;

#[async_trait]
impl Router for PassthroughRouter {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    async fn route(
        &self,
        _source: &RoutingSource,
        _candidates: &[Candidate],
    ) -> Result<RoutingOutcome, RoutingError> {
        Ok(RoutingOutcome::Unmatched)
    }
}
