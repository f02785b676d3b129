//! Service configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::registry::ServiceInstance;
use crate::selection::UnavailablePolicy;

/// Fallback strategy used when the router has no opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Round-robin across instances
    #[default]
    RoundRobin,
    /// Random selection
    Random,
    /// Lowest priority number wins
    PriorityOnly,
}

impl From<FallbackStrategy> for crate::balancer::FallbackStrategy {
    fn from(strategy: FallbackStrategy) -> Self {
        match strategy {
            FallbackStrategy::RoundRobin => crate::balancer::FallbackStrategy::RoundRobin,
            FallbackStrategy::Random => crate::balancer::FallbackStrategy::Random,
            FallbackStrategy::PriorityOnly => crate::balancer::FallbackStrategy::PriorityOnly,
        }
    }
}

/// One logical service and its statically known instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(default)]
    pub fallback: FallbackStrategy,
    #[serde(default)]
    pub unavailable_policy: UnavailablePolicy,
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

/// Static instance definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Instance ID; a UUID is generated when omitted
    #[serde(default)]
    pub id: Option<String>,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl InstanceConfig {
    /// Build the registry instance for `service_id`
    pub fn to_instance(&self, service_id: &str) -> ServiceInstance {
        ServiceInstance {
            instance_id: self
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            service_id: service_id.to_string(),
            host: self.host.clone(),
            port: self.port,
            secure: self.secure,
            priority: self.priority,
            metadata: self.metadata.clone(),
        }
    }
}
