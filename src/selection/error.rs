//! Error types for selection failures

use thiserror::Error;

use crate::registry::RegistryError;
use crate::routing::RoutingError;

/// Infrastructure failures during selection.
///
/// A selection that legitimately finds no instance is not an error; it is
/// reported as [`SelectionResult::NoInstance`](super::SelectionResult::NoInstance).
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The instance pool could not be obtained
    #[error(transparent)]
    Source(#[from] RegistryError),

    /// The router failed to reach a decision
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// No coordinator is registered for the service
    #[error("No load balancer registered for service '{0}'")]
    UnknownService(String),

    /// A fallback balancer failed for reasons of its own
    #[error("Fallback balancer '{balancer}' failed: {message}")]
    Fallback { balancer: String, message: String },
}

