use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single backend instance of a logical service.
///
/// Owned by the discovery side; the selection path only clones and hands it
/// back. Equality compares every field.
///
/// # Examples
///
/// ```
/// use route_balancer::registry::ServiceInstance;
///
/// let instance = ServiceInstance::new("orders-1", "orders-service", "10.0.0.1", 8080);
/// assert_eq!(instance.uri(), "http://10.0.0.1:8080");
/// assert_eq!(instance.priority, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Unique identifier within the service
    pub instance_id: String,
    /// Logical service this instance belongs to
    pub service_id: String,
    /// Hostname or IP address
    pub host: String,
    pub port: u16,
    /// Whether the instance is reached over TLS
    #[serde(default)]
    pub secure: bool,
    /// Priority for the priority fallback strategy (lower = prefer)
    #[serde(default)]
    pub priority: i32,
    /// Additional metadata key-value pairs (zone, version, tags, ...)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ServiceInstance {
    /// Create an instance with no metadata, priority 0, plain HTTP.
    pub fn new(
        instance_id: impl Into<String>,
        service_id: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            service_id: service_id.into(),
            host: host.into(),
            port,
            secure: false,
            priority: 0,
            metadata: HashMap::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Base URI for requests to this instance
    pub fn uri(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}
