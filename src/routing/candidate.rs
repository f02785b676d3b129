//! Candidate adapter
//!
//! Wraps service instances into routing locations for a single selection.

use crate::registry::ServiceInstance;

/// A routing location wrapping exactly one [`ServiceInstance`].
///
/// Candidates are built per selection attempt and never mutated. The wrapped
/// instance is recovered unchanged via [`Candidate::into_instance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    instance: ServiceInstance,
}

impl Candidate {
    pub fn new(instance: ServiceInstance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &ServiceInstance {
        &self.instance
    }

    pub fn into_instance(self) -> ServiceInstance {
        self.instance
    }

    pub fn instance_id(&self) -> &str {
        &self.instance.instance_id
    }

    /// Look up a metadata value on the wrapped instance
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.instance.metadata.get(key).map(String::as_str)
    }
}

impl From<ServiceInstance> for Candidate {
    fn from(instance: ServiceInstance) -> Self {
        Self::new(instance)
    }
}

/// Wrap instances into candidates, one-to-one and in order.
///
/// # Examples
///
/// ```
/// use route_balancer::registry::ServiceInstance;
/// use route_balancer::routing::wrap;
///
/// let instances = vec![
///     ServiceInstance::new("a", "orders-service", "10.0.0.1", 8080),
///     ServiceInstance::new("b", "orders-service", "10.0.0.2", 8080),
/// ];
/// let candidates = wrap(instances.clone());
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates[1].instance(), &instances[1]);
/// ```
pub fn wrap(instances: Vec<ServiceInstance>) -> Vec<Candidate> {
    instances.into_iter().map(Candidate::new).collect()
}
