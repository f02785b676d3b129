//! Fallback balancers
//!
//! A fallback balancer picks an instance when the router returns
//! [`RoutingOutcome::Unmatched`](crate::routing::RoutingOutcome::Unmatched).
//! It knows nothing about routing rules and selects from its own pool.

pub mod strategy;

pub use strategy::FallbackStrategy;

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::registry::InstanceSource;
use crate::routing::RequestContext;
use crate::selection::{SelectionError, SelectionResult};

/// Default, policy-agnostic instance selection.
#[async_trait]
pub trait FallbackBalancer: Send + Sync {
    /// Returns balancer identifier for logging.
    fn name(&self) -> &'static str;

    /// Select an instance for the request, or [`SelectionResult::NoInstance`]
    /// when the pool is empty.
    async fn choose(&self, request: &RequestContext) -> Result<SelectionResult, SelectionError>;
}

/// Fallback balancer applying a [`FallbackStrategy`] to a freshly fetched pool.
///
/// # Examples
///
/// ```
/// use route_balancer::balancer::{FallbackBalancer, FallbackStrategy, StrategyBalancer};
/// use route_balancer::registry::{ServiceInstance, StaticInstanceSource};
/// use route_balancer::routing::RequestContext;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let source = Arc::new(StaticInstanceSource::new(vec![
///     ServiceInstance::new("a", "orders-service", "10.0.0.1", 8080),
///     ServiceInstance::new("b", "orders-service", "10.0.0.2", 8080),
/// ]));
/// let balancer = StrategyBalancer::new("orders-service", source, FallbackStrategy::RoundRobin);
///
/// let first = balancer.choose(&RequestContext::new()).await.unwrap();
/// assert_eq!(first.instance().unwrap().instance_id, "a");
/// # });
/// ```
pub struct StrategyBalancer {
    service_id: String,
    source: Arc<dyn InstanceSource>,
    strategy: FallbackStrategy,
    /// Round-robin counter, only advanced by the round-robin strategy
    counter: AtomicU64,
}

impl StrategyBalancer {
    pub fn new(
        service_id: impl Into<String>,
        source: Arc<dyn InstanceSource>,
        strategy: FallbackStrategy,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            source,
            strategy,
            counter: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> FallbackStrategy {
        self.strategy
    }
}

#[async_trait]
impl FallbackBalancer for StrategyBalancer {
    fn name(&self) -> &'static str {
        match self.strategy {
            FallbackStrategy::RoundRobin => "round_robin",
            FallbackStrategy::Random => "random",
            FallbackStrategy::PriorityOnly => "priority_only",
        }
    }

    async fn choose(&self, request: &RequestContext) -> Result<SelectionResult, SelectionError> {
        let instances = self.source.get(request).await?;

        if instances.is_empty() {
            tracing::debug!(
                service = %self.service_id,
                request_id = %request.request_id(),
                strategy = %self.strategy,
                "Fallback pool empty"
            );
            return Ok(SelectionResult::NoInstance);
        }

        let counter = match self.strategy {
            FallbackStrategy::RoundRobin => self.counter.fetch_add(1, Ordering::Relaxed),
            FallbackStrategy::Random | FallbackStrategy::PriorityOnly => 0,
        };

        let index = self.strategy.pick(
            instances.len(),
            counter,
            instances.iter().map(|instance| instance.priority),
        );

        let selected = index.and_then(|index| instances.into_iter().nth(index));
        if let Some(instance) = &selected {
            tracing::debug!(
                service = %self.service_id,
                request_id = %request.request_id(),
                strategy = %self.strategy,
                instance_id = %instance.instance_id,
                "Fallback selected instance"
            );
        }

        Ok(selected.into())
    }
}
