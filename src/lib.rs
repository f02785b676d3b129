//! route-balancer - router-driven service instance selection
//!
//! Wraps a service's instances into routing candidates, asks a pluggable
//! [`Router`](routing::Router) to pick one, and defers to a
//! [`FallbackBalancer`](balancer::FallbackBalancer) when the router has no
//! opinion.

pub mod balancer;
pub mod config;
pub mod logging;
pub mod registry;
pub mod routing;
pub mod selection;

pub use selection::{LoadBalancerRegistry, SelectionCoordinator, SelectionError, SelectionResult};
