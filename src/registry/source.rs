//! Instance sources feeding the selection path

use async_trait::async_trait;
use std::sync::Arc;

use super::{InstanceRegistry, RegistryError, ServiceInstance};
use crate::routing::RequestContext;

/// Provider of the current candidate pool for one logical service.
///
/// An empty pool is a valid answer. Implementations return an error only when
/// the pool itself cannot be obtained.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    async fn get(&self, request: &RequestContext) -> Result<Vec<ServiceInstance>, RegistryError>;
}

/// Source used when no provider exists for a service. Always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstanceSource;

#[async_trait]
impl InstanceSource for NoopInstanceSource {
    async fn get(&self, _request: &RequestContext) -> Result<Vec<ServiceInstance>, RegistryError> {
        Ok(Vec::new())
    }
}

/// Fixed list of instances, returned as-is on every call.
#[derive(Debug, Clone, Default)]
pub struct StaticInstanceSource {
    instances: Vec<ServiceInstance>,
}

impl StaticInstanceSource {
    pub fn new(instances: Vec<ServiceInstance>) -> Self {
        Self { instances }
    }
}

#[async_trait]
impl InstanceSource for StaticInstanceSource {
    async fn get(&self, _request: &RequestContext) -> Result<Vec<ServiceInstance>, RegistryError> {
        Ok(self.instances.clone())
    }
}

/// Live view of one service in an [`InstanceRegistry`].
///
/// Each call snapshots the service's current instances, so additions and
/// removals are visible to the next selection.
pub struct RegistryInstanceSource {
    registry: Arc<InstanceRegistry>,
    service_id: String,
}

impl RegistryInstanceSource {
    pub fn new(registry: Arc<InstanceRegistry>, service_id: impl Into<String>) -> Self {
        Self {
            registry,
            service_id: service_id.into(),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

#[async_trait]
impl InstanceSource for RegistryInstanceSource {
    async fn get(&self, _request: &RequestContext) -> Result<Vec<ServiceInstance>, RegistryError> {
        Ok(self.registry.get_instances(&self.service_id))
    }
}
