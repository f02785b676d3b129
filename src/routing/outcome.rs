//! Routing outcome types
//!
//! The router's decision for a single selection.

use super::candidate::Candidate;

/// Three-way decision returned by a [`Router`](super::Router).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOutcome {
    /// A rule selected this candidate. The decision is final.
    Matched(Candidate),

    /// No rule applied. The caller defers to its fallback balancer.
    Unmatched,

    /// A rule applied but its target is intentionally unreachable.
    /// The caller returns no instance without consulting a fallback.
    Unavailable,
}

impl RoutingOutcome {
    /// Label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            RoutingOutcome::Matched(_) => "matched",
            RoutingOutcome::Unmatched => "unmatched",
            RoutingOutcome::Unavailable => "unavailable",
        }
    }

    /// The matched candidate, if any
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            RoutingOutcome::Matched(candidate) => Some(candidate),
            RoutingOutcome::Unmatched | RoutingOutcome::Unavailable => None,
        }
    }
}
