//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::RegistryError;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Service '{0}' is defined more than once")]
    DuplicateService(String),

    #[error("Service '{service}' defines instance '{instance_id}' more than once")]
    DuplicateInstance { service: String, instance_id: String },

    #[error("Failed to register instances: {0}")]
    Registry(#[from] RegistryError),
}
