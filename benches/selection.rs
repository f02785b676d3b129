//! Benchmarks for selection latency with varying pool sizes.

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use route_balancer::balancer::{FallbackStrategy, StrategyBalancer};
use route_balancer::registry::{InstanceRegistry, ServiceInstance};
use route_balancer::routing::{
    wrap, Candidate, PassthroughRouter, RequestContext, Router, RoutingError, RoutingOutcome,
    RoutingSource,
};
use route_balancer::SelectionCoordinator;
use std::sync::Arc;

const SERVICE: &str = "orders-service";

fn create_instance(id: usize) -> ServiceInstance {
    ServiceInstance::new(
        format!("instance-{}", id),
        SERVICE,
        format!("10.0.{}.{}", id / 256, id % 256),
        8080,
    )
    .with_priority((id % 5) as i32)
    .with_metadata("zone", if id % 2 == 0 { "eu" } else { "us" })
}

fn create_registry(instance_count: usize) -> Arc<InstanceRegistry> {
    let registry = Arc::new(InstanceRegistry::new());
    for i in 0..instance_count {
        registry.add_instance(create_instance(i)).unwrap();
    }
    registry
}

/// Matches the last candidate whose zone equals the region header.
struct ZoneRouter;

#[async_trait]
impl Router for ZoneRouter {
    fn name(&self) -> &'static str {
        "zone"
    }

    async fn route(
        &self,
        source: &RoutingSource,
        candidates: &[Candidate],
    ) -> Result<RoutingOutcome, RoutingError> {
        let Some(region) = source.header("region") else {
            return Ok(RoutingOutcome::Unmatched);
        };
        Ok(candidates
            .iter()
            .rev()
            .find(|candidate| candidate.metadata("zone") == Some(region))
            .cloned()
            .map(RoutingOutcome::Matched)
            .unwrap_or(RoutingOutcome::Unavailable))
    }
}

fn create_coordinator(registry: &Arc<InstanceRegistry>, router: Arc<dyn Router>) -> SelectionCoordinator {
    SelectionCoordinator::new(
        SERVICE,
        Some(registry.source_for(SERVICE)),
        router,
        Arc::new(StrategyBalancer::new(
            SERVICE,
            registry.source_for(SERVICE),
            FallbackStrategy::RoundRobin,
        )),
    )
}

/// Benchmark wrapping instances into candidates.
fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap");

    for count in [1, 10, 100] {
        let instances: Vec<ServiceInstance> = (0..count).map(create_instance).collect();
        group.bench_with_input(BenchmarkId::new("instances", count), &count, |b, _| {
            b.iter(|| black_box(wrap(instances.clone())));
        });
    }

    group.finish();
}

/// Benchmark a full selection that the router decides.
fn bench_matched_selection(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("matched_selection");

    for count in [5, 25, 100] {
        let registry = create_registry(count);
        let coordinator = create_coordinator(&registry, Arc::new(ZoneRouter));
        let ctx = RequestContext::with_request_id("bench").with_header("region", "eu");

        group.bench_with_input(BenchmarkId::new("instances", count), &count, |b, _| {
            b.iter(|| black_box(rt.block_on(coordinator.choose(&ctx)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark a selection that is delegated to the round-robin fallback.
fn bench_fallback_selection(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let registry = create_registry(25);
    let coordinator = create_coordinator(&registry, Arc::new(PassthroughRouter));
    let ctx = RequestContext::with_request_id("bench");

    c.bench_function("fallback_selection_25_instances", |b| {
        b.iter(|| black_box(rt.block_on(coordinator.choose(&ctx)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_wrap,
    bench_matched_selection,
    bench_fallback_selection
);
criterion_main!(benches);
