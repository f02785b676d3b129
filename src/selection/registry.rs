//! Per-service coordinator registry

use dashmap::DashMap;
use std::sync::Arc;

use super::{SelectionCoordinator, SelectionError, SelectionResult};
use crate::balancer::{FallbackBalancer, StrategyBalancer};
use crate::config::{ConfigError, RouteBalancerConfig};
use crate::registry::InstanceRegistry;
use crate::routing::{RequestContext, Router};

/// Named entry point for selections across many logical services.
///
/// Each service has its own independently configured
/// [`SelectionCoordinator`].
///
/// # Examples
///
/// ```
/// use route_balancer::config::RouteBalancerConfig;
/// use route_balancer::routing::{PassthroughRouter, RequestContext};
/// use route_balancer::selection::LoadBalancerRegistry;
/// use std::sync::Arc;
///
/// let config: RouteBalancerConfig = toml::from_str(r#"
/// [[services]]
/// name = "orders-service"
///
/// [[services.instances]]
/// id = "orders-a"
/// host = "10.0.0.1"
/// port = 8080
/// "#).unwrap();
///
/// let balancers = LoadBalancerRegistry::from_config(&config, Arc::new(PassthroughRouter)).unwrap();
///
/// # tokio_test::block_on(async {
/// let result = balancers
///     .choose("orders-service", &RequestContext::new())
///     .await
///     .unwrap();
/// assert_eq!(result.instance().unwrap().instance_id, "orders-a");
/// # });
/// ```
pub struct LoadBalancerRegistry {
    coordinators: DashMap<String, Arc<SelectionCoordinator>>,
    instances: Arc<InstanceRegistry>,
}

impl LoadBalancerRegistry {
    /// Create an empty registry backed by `instances`.
    pub fn new(instances: Arc<InstanceRegistry>) -> Self {
        Self {
            coordinators: DashMap::new(),
            instances,
        }
    }

    /// Build one coordinator per configured service.
    ///
    /// Static instances are loaded into a fresh [`InstanceRegistry`]; every
    /// coordinator shares `router` and gets its own [`StrategyBalancer`].
    ///
    /// # Errors
    ///
    /// Returns the first validation error in `config`.
    pub fn from_config(
        config: &RouteBalancerConfig,
        router: Arc<dyn Router>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let instances = Arc::new(InstanceRegistry::new());
        let registry = Self::new(Arc::clone(&instances));

        for service in &config.services {
            instances.register_service(&service.name);
            for instance in &service.instances {
                instances.add_instance(instance.to_instance(&service.name))?;
            }

            let source = instances.source_for(&service.name);
            let fallback: Arc<dyn FallbackBalancer> = Arc::new(StrategyBalancer::new(
                service.name.clone(),
                Arc::clone(&source),
                service.fallback.into(),
            ));

            let coordinator =
                SelectionCoordinator::new(service.name.clone(), Some(source), Arc::clone(&router), fallback)
                    .with_unavailable_policy(service.unavailable_policy);
            registry.register(coordinator);

            tracing::info!(
                service = %service.name,
                instances = service.instances.len(),
                router = router.name(),
                fallback = ?service.fallback,
                "Load balancer registered"
            );
        }

        Ok(registry)
    }

    /// Register a coordinator under its service ID.
    ///
    /// Replaces and returns any coordinator previously registered for the
    /// same service.
    pub fn register(&self, coordinator: SelectionCoordinator) -> Option<Arc<SelectionCoordinator>> {
        self.coordinators
            .insert(coordinator.service_id().to_string(), Arc::new(coordinator))
    }

    /// Get the coordinator for a service.
    pub fn get(&self, service_id: &str) -> Option<Arc<SelectionCoordinator>> {
        self.coordinators
            .get(service_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Registered service IDs, sorted.
    pub fn services(&self) -> Vec<String> {
        let mut services: Vec<String> = self
            .coordinators
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        services.sort();
        services
    }

    /// Instance registry the configured coordinators read from.
    pub fn instances(&self) -> &Arc<InstanceRegistry> {
        &self.instances
    }

    /// Select an instance of `service_id` for one request.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::UnknownService` if no coordinator is
    /// registered for the service, otherwise whatever the coordinator returns.
    pub async fn choose(
        &self,
        service_id: &str,
        request: &RequestContext,
    ) -> Result<SelectionResult, SelectionError> {
        // Clone the Arc so no map guard is held across the await
        let coordinator = self
            .get(service_id)
            .ok_or_else(|| SelectionError::UnknownService(service_id.to_string()))?;

        coordinator.choose(request).await
    }
}
