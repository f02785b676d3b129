//! Error types for routing failures

use thiserror::Error;

/// Errors raised by a [`Router`](super::Router) while deciding.
///
/// A router that simply has no opinion returns
/// [`RoutingOutcome::Unmatched`](super::RoutingOutcome::Unmatched) instead.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The router could not evaluate its rules
    #[error("Router '{router}' failed: {message}")]
    RouterFailed { router: String, message: String },

    /// The router matched an instance that was not among the candidates
    #[error("Router '{router}' matched unknown instance '{instance_id}'")]
    InvalidCandidate { router: String, instance_id: String },
}
