//! Configuration module for route-balancer
//!
//! Provides configuration loading from a TOML file, environment variables,
//! and defaults.
//!
//! # Configuration Precedence
//!
//! 1. Environment variables (`ROUTE_BALANCER_*`)
//! 2. Configuration file (TOML)
//! 3. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use route_balancer::config::RouteBalancerConfig;
//!
//! let toml = r#"
//! [[services]]
//! name = "orders-service"
//!
//! [[services.instances]]
//! host = "10.0.0.1"
//! port = 8080
//! "#;
//! let config: RouteBalancerConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.services[0].instances.len(), 1);
//! assert!(config.validate().is_ok());
//! ```

pub mod error;
pub mod logging;
pub mod service;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use service::{FallbackStrategy, InstanceConfig, ServiceConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::level_filters::LevelFilter;

/// Top-level configuration: logging plus one entry per logical service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RouteBalancerConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Logical services and their static instances
    pub services: Vec<ServiceConfig>,
}

impl RouteBalancerConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports ROUTE_BALANCER_LOG_LEVEL and ROUTE_BALANCER_LOG_FORMAT.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("ROUTE_BALANCER_LOG_LEVEL") {
            if level.parse::<LevelFilter>().is_ok() {
                self.logging.level = level;
            }
        }
        if let Ok(format) = std::env::var("ROUTE_BALANCER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|service| service.name == name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;

        let mut names = HashSet::new();

        for (i, service) in self.services.iter().enumerate() {
            if service.name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("services[{}].name", i),
                    message: "name cannot be empty".to_string(),
                });
            }
            if !names.insert(service.name.as_str()) {
                return Err(ConfigError::DuplicateService(service.name.clone()));
            }

            let mut ids = HashSet::new();
            for (j, instance) in service.instances.iter().enumerate() {
                if instance.host.trim().is_empty() {
                    return Err(ConfigError::Validation {
                        field: format!("services[{}].instances[{}].host", i, j),
                        message: "host cannot be empty".to_string(),
                    });
                }
                if instance.port == 0 {
                    return Err(ConfigError::Validation {
                        field: format!("services[{}].instances[{}].port", i, j),
                        message: "port must be non-zero".to_string(),
                    });
                }
                if let Some(id) = &instance.id {
                    if !ids.insert(id.as_str()) {
                        return Err(ConfigError::DuplicateInstance {
                            service: service.name.clone(),
                            instance_id: id.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
