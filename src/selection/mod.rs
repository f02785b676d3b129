//! Router-driven instance selection
//!
//! The [`SelectionCoordinator`] asks a [`Router`] to pick one instance of a
//! service and defers to a [`FallbackBalancer`] when the router has no
//! opinion.
//!
//! # Algorithm
//! 1. Fetch the service's instances from its [`InstanceSource`]
//! 2. Wrap them into candidates and build a [`RoutingSource`]
//! 3. Route once and classify the outcome:
//!    - `Matched` returns the candidate's instance
//!    - `Unavailable` returns [`SelectionResult::NoInstance`]
//!    - `Unmatched` returns whatever the fallback balancer returns
//!
//! Failures of the source, the router or the fallback propagate unchanged and
//! never trigger the fallback.

pub mod error;
pub mod registry;

pub use error::SelectionError;
pub use registry::LoadBalancerRegistry;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::balancer::FallbackBalancer;
use crate::registry::{InstanceSource, NoopInstanceSource, ServiceInstance};
use crate::routing::{wrap, RequestContext, Router, RoutingError, RoutingOutcome, RoutingSource};

/// Final answer of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    /// The instance that should serve the request
    Selected(ServiceInstance),

    /// No instance should serve the request. Not a failure: callers typically
    /// answer with a service-unavailable response.
    NoInstance,
}

impl SelectionResult {
    pub fn instance(&self) -> Option<&ServiceInstance> {
        match self {
            SelectionResult::Selected(instance) => Some(instance),
            SelectionResult::NoInstance => None,
        }
    }

    pub fn into_instance(self) -> Option<ServiceInstance> {
        match self {
            SelectionResult::Selected(instance) => Some(instance),
            SelectionResult::NoInstance => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionResult::Selected(_))
    }
}

impl From<Option<ServiceInstance>> for SelectionResult {
    fn from(instance: Option<ServiceInstance>) -> Self {
        match instance {
            Some(instance) => SelectionResult::Selected(instance),
            None => SelectionResult::NoInstance,
        }
    }
}

/// How a [`RoutingOutcome::Unavailable`] decision is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnavailablePolicy {
    /// The refusal is final: return no instance without consulting the fallback
    #[default]
    Final,
    /// Treat the refusal like an unmatched decision and consult the fallback
    Fallback,
}

/// Per-service selection entry point.
///
/// Holds no per-request state; concurrent calls to [`choose`](Self::choose)
/// share only the injected collaborators.
pub struct SelectionCoordinator {
    service_id: String,
    source: Arc<dyn InstanceSource>,
    router: Arc<dyn Router>,
    fallback: Arc<dyn FallbackBalancer>,
    unavailable_policy: UnavailablePolicy,
}

impl SelectionCoordinator {
    /// Create a coordinator for `service_id`.
    ///
    /// `source` is resolved once here. Pass `None` when the service has no
    /// provider; selections then see an empty pool.
    pub fn new(
        service_id: impl Into<String>,
        source: Option<Arc<dyn InstanceSource>>,
        router: Arc<dyn Router>,
        fallback: Arc<dyn FallbackBalancer>,
    ) -> Self {
        let service_id = service_id.into();
        let source = source.unwrap_or_else(|| {
            tracing::debug!(
                service = %service_id,
                "No instance source for service, using empty source"
            );
            Arc::new(NoopInstanceSource)
        });

        Self {
            service_id,
            source,
            router,
            fallback,
            unavailable_policy: UnavailablePolicy::default(),
        }
    }

    pub fn with_unavailable_policy(mut self, policy: UnavailablePolicy) -> Self {
        self.unavailable_policy = policy;
        self
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn unavailable_policy(&self) -> UnavailablePolicy {
        self.unavailable_policy
    }

    /// Select an instance for one request.
    ///
    /// # Errors
    ///
    /// - `SelectionError::Source` if the instance pool cannot be fetched
    /// - `SelectionError::Routing` if the router fails or matches an instance
    ///   that was not offered to it
    /// - whatever the fallback balancer returns, unchanged
    pub async fn choose(&self, request: &RequestContext) -> Result<SelectionResult, SelectionError> {
        let start = Instant::now();

        let result = self.select(request).await;

        metrics::histogram!(
            "route_balancer_selection_duration_seconds",
            "service" => self.service_id.clone(),
        )
        .record(start.elapsed().as_secs_f64());

        result
    }

    async fn select(&self, request: &RequestContext) -> Result<SelectionResult, SelectionError> {
        let instances = self
            .source
            .get(request)
            .await
            .map_err(|e| self.failed("source", e.into()))?;

        let candidates = wrap(instances);
        let source = RoutingSource::new(self.service_id.clone(), request.clone());

        tracing::debug!(
            service = %self.service_id,
            request_id = %request.request_id(),
            router = self.router.name(),
            candidates = candidates.len(),
            "Routing request"
        );

        let outcome = self
            .router
            .route(&source, &candidates)
            .await
            .map_err(|e| self.failed("routing", e.into()))?;

        // A match outside the offered candidates is a router failure, not a selection
        if let Some(foreign) = outcome.candidate().filter(|c| !candidates.contains(*c)) {
            let err = RoutingError::InvalidCandidate {
                router: self.router.name().to_string(),
                instance_id: foreign.instance_id().to_string(),
            };
            return Err(self.failed("routing", err.into()));
        }

        metrics::counter!(
            "route_balancer_selections_total",
            "service" => self.service_id.clone(),
            "outcome" => outcome.label(),
        )
        .increment(1);

        match outcome {
            RoutingOutcome::Matched(candidate) => {
                tracing::debug!(
                    service = %self.service_id,
                    request_id = %request.request_id(),
                    outcome = "matched",
                    instance_id = %candidate.instance_id(),
                    "Router matched instance"
                );
                Ok(SelectionResult::Selected(candidate.into_instance()))
            }
            RoutingOutcome::Unavailable => match self.unavailable_policy {
                UnavailablePolicy::Final => {
                    tracing::info!(
                        service = %self.service_id,
                        request_id = %request.request_id(),
                        outcome = "unavailable",
                        "Router refused request, no instance selected"
                    );
                    Ok(SelectionResult::NoInstance)
                }
                UnavailablePolicy::Fallback => self.delegate(request, "unavailable").await,
            },
            RoutingOutcome::Unmatched => self.delegate(request, "unmatched").await,
        }
    }

    async fn delegate(
        &self,
        request: &RequestContext,
        outcome: &'static str,
    ) -> Result<SelectionResult, SelectionError> {
        tracing::debug!(
            service = %self.service_id,
            request_id = %request.request_id(),
            outcome,
            balancer = self.fallback.name(),
            "Delegating to fallback balancer"
        );

        self.fallback
            .choose(request)
            .await
            .map_err(|e| self.failed("fallback", e))
    }

    fn failed(&self, stage: &'static str, err: SelectionError) -> SelectionError {
        tracing::warn!(
            service = %self.service_id,
            stage,
            error = %err,
            "Selection failed"
        );
        metrics::counter!(
            "route_balancer_selection_errors_total",
            "service" => self.service_id.clone(),
            "stage" => stage,
        )
        .increment(1);
        err
    }
}
