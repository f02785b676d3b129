//! Shared test utilities for route-balancer integration tests.
//!
//! Provides instance builders, a header-matching router and an instrumented
//! fallback balancer.

#![allow(dead_code)]

use async_trait::async_trait;
use route_balancer::balancer::FallbackBalancer;
use route_balancer::registry::{InstanceRegistry, ServiceInstance};
use route_balancer::routing::{
    Candidate, RequestContext, Router, RoutingError, RoutingOutcome, RoutingSource,
};
use route_balancer::{SelectionError, SelectionResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ORDERS: &str = "orders-service";

// =============================================================================
// Instance Builders
// =============================================================================

/// Create an instance of `service` with a host derived from the ID.
pub fn make_instance(id: &str, service: &str) -> ServiceInstance {
    ServiceInstance::new(id, service, format!("{}.internal", id.to_lowercase()), 8080)
}

/// Registry holding instances A, B and C of orders-service.
pub fn orders_registry() -> Arc<InstanceRegistry> {
    let registry = Arc::new(InstanceRegistry::new());
    for id in ["A", "B", "C"] {
        registry
            .add_instance(make_instance(id, ORDERS).with_metadata("name", id))
            .unwrap();
    }
    registry
}

// =============================================================================
// Header Router
// =============================================================================

/// "Requests with header `header: value` go to instance `target`".
///
/// A `None` target models a rule whose destination is disabled.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    pub header: String,
    pub value: String,
    pub target: Option<String>,
}

impl HeaderRule {
    pub fn to(header: &str, value: &str, target: &str) -> Self {
        Self {
            header: header.to_string(),
            value: value.to_string(),
            target: Some(target.to_string()),
        }
    }

    pub fn disabled(header: &str, value: &str) -> Self {
        Self {
            header: header.to_string(),
            value: value.to_string(),
            target: None,
        }
    }
}

/// Router matching request headers against an ordered rule list.
///
/// First matching rule wins. A matching rule whose target is disabled or not
/// among the candidates yields `Unavailable`; no matching rule yields
/// `Unmatched`.
pub struct HeaderRouter {
    rules: Vec<HeaderRule>,
    calls: AtomicUsize,
    seen_candidates: Mutex<Vec<Vec<String>>>,
}

impl HeaderRouter {
    pub fn new(rules: Vec<HeaderRule>) -> Arc<Self> {
        Arc::new(Self {
            rules,
            calls: AtomicUsize::new(0),
            seen_candidates: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Candidate IDs offered on each call, in the order they were offered.
    pub fn seen_candidates(&self) -> Vec<Vec<String>> {
        self.seen_candidates.lock().unwrap().clone()
    }
}

#[async_trait]
impl Router for HeaderRouter {
    fn name(&self) -> &'static str {
        "header"
    }

    async fn route(
        &self,
        source: &RoutingSource,
        candidates: &[Candidate],
    ) -> Result<RoutingOutcome, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_candidates.lock().unwrap().push(
            candidates
                .iter()
                .map(|candidate| candidate.instance_id().to_string())
                .collect(),
        );

        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| source.header(&rule.header) == Some(rule.value.as_str()))
        else {
            return Ok(RoutingOutcome::Unmatched);
        };

        let matched = rule.target.as_ref().and_then(|target| {
            candidates
                .iter()
                .find(|candidate| candidate.instance_id() == target)
        });

        Ok(match matched {
            Some(candidate) => RoutingOutcome::Matched(candidate.clone()),
            None => RoutingOutcome::Unavailable,
        })
    }
}

/// Router that always fails.
pub struct BrokenRouter;

#[async_trait]
impl Router for BrokenRouter {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn route(
        &self,
        _source: &RoutingSource,
        _candidates: &[Candidate],
    ) -> Result<RoutingOutcome, RoutingError> {
        Err(RoutingError::RouterFailed {
            router: "broken".to_string(),
            message: "rule store unreachable".to_string(),
        })
    }
}

// =============================================================================
// Instrumented Fallback
// =============================================================================

/// Wraps a fallback balancer and counts how often it is consulted.
pub struct CountingFallback {
    inner: Arc<dyn FallbackBalancer>,
    calls: AtomicUsize,
}

impl CountingFallback {
    pub fn wrap(inner: Arc<dyn FallbackBalancer>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackBalancer for CountingFallback {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn choose(&self, request: &RequestContext) -> Result<SelectionResult, SelectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.choose(request).await
    }
}
