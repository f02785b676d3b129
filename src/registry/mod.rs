//! Service instance registry module.
//!
//! Provides thread-safe in-memory storage of service instances and the
//! [`InstanceSource`] contract the selection path reads them through.

mod error;
mod instance;
mod source;

pub use error::*;
pub use instance::*;
pub use source::*;

use dashmap::DashMap;
use std::sync::Arc;

/// The Instance Registry stores known instances grouped by service ID.
///
/// Uses a lock-free concurrent map (DashMap) so discovery updates never block
/// selections in flight. Instances keep their insertion order per service.
///
/// # Examples
///
/// ```
/// use route_balancer::registry::{InstanceRegistry, ServiceInstance};
///
/// let registry = InstanceRegistry::new();
/// registry
///     .add_instance(ServiceInstance::new("a", "orders-service", "10.0.0.1", 8080))
///     .unwrap();
///
/// assert_eq!(registry.instance_count(), 1);
/// assert_eq!(registry.get_instances("orders-service").len(), 1);
/// ```
pub struct InstanceRegistry {
    services: DashMap<String, Vec<ServiceInstance>>,
}

impl InstanceRegistry {
    /// Create a new empty InstanceRegistry.
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Declare a service with no instances yet.
    ///
    /// The service gets an instance source even while it is empty. Does
    /// nothing if the service is already known.
    pub fn register_service(&self, service_id: &str) {
        self.services.entry(service_id.to_string()).or_default();
    }

    /// Add an instance under its `service_id`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateInstance` if the service already has an
    /// instance with the same ID.
    pub fn add_instance(&self, instance: ServiceInstance) -> Result<(), RegistryError> {
        let mut instances = self
            .services
            .entry(instance.service_id.clone())
            .or_default();

        if instances
            .iter()
            .any(|existing| existing.instance_id == instance.instance_id)
        {
            return Err(RegistryError::DuplicateInstance {
                service: instance.service_id,
                instance_id: instance.instance_id,
            });
        }

        tracing::debug!(
            service = %instance.service_id,
            instance_id = %instance.instance_id,
            uri = %instance.uri(),
            "Instance registered"
        );
        instances.push(instance);
        Ok(())
    }

    /// Remove an instance from a service.
    ///
    /// The service itself stays registered even when its last instance goes.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ServiceNotFound` for an unknown service and
    /// `RegistryError::InstanceNotFound` if the service has no such instance.
    pub fn remove_instance(
        &self,
        service_id: &str,
        instance_id: &str,
    ) -> Result<ServiceInstance, RegistryError> {
        let mut instances = self
            .services
            .get_mut(service_id)
            .ok_or_else(|| RegistryError::ServiceNotFound(service_id.to_string()))?;

        let position = instances
            .iter()
            .position(|instance| instance.instance_id == instance_id)
            .ok_or_else(|| RegistryError::InstanceNotFound {
                service: service_id.to_string(),
                instance_id: instance_id.to_string(),
            })?;

        let removed = instances.remove(position);
        tracing::debug!(
            service = %service_id,
            instance_id = %instance_id,
            remaining = instances.len(),
            "Instance removed"
        );
        Ok(removed)
    }

    /// Snapshot of a service's instances in insertion order.
    ///
    /// Unknown services yield an empty list.
    pub fn get_instances(&self, service_id: &str) -> Vec<ServiceInstance> {
        self.services
            .get(service_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn contains_service(&self, service_id: &str) -> bool {
        self.services.contains_key(service_id)
    }

    /// Get the number of registered services.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Get the number of instances across all services.
    pub fn instance_count(&self) -> usize {
        self.services.iter().map(|entry| entry.value().len()).sum()
    }

    /// Instance source reading this registry's pool for a service.
    ///
    /// The service does not have to be known yet. Its pool reads empty until
    /// instances are added.
    pub fn source_for(self: &Arc<Self>, service_id: &str) -> Arc<dyn InstanceSource> {
        Arc::new(RegistryInstanceSource::new(Arc::clone(self), service_id))
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
