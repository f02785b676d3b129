//! Logging configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use super::ConfigError;

/// Modules of this crate that accept their own log level
pub const LOG_COMPONENTS: &[&str] = &[
    "balancer",
    "config",
    "logging",
    "registry",
    "routing",
    "selection",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Pretty-printed logs for humans
    #[default]
    Pretty,
    /// JSON logs for log pipelines
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
///
/// `component_levels` keys name modules of this crate (see
/// [`LOG_COMPONENTS`]), so `selection = "debug"` turns on per-request
/// routing decisions without the rest of the crate's debug output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Check the base level and every component override.
    ///
    /// Levels are tracing level names (`off`, `error` .. `trace`), case
    /// insensitive. Components must be one of [`LOG_COMPONENTS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_level("logging.level", &self.level)?;

        if let Some(component_levels) = &self.component_levels {
            let mut components: Vec<_> = component_levels.iter().collect();
            components.sort();
            for (component, level) in components {
                let field = format!("logging.component_levels.{}", component);
                if !LOG_COMPONENTS.contains(&component.as_str()) {
                    return Err(ConfigError::Validation {
                        field,
                        message: format!(
                            "unknown component, expected one of: {}",
                            LOG_COMPONENTS.join(", ")
                        ),
                    });
                }
                check_level(&field, level)?;
            }
        }

        Ok(())
    }
}

fn check_level(field: &str, level: &str) -> Result<(), ConfigError> {
    LevelFilter::from_str(level)
        .map(|_| ())
        .map_err(|_| ConfigError::Validation {
            field: field.to_string(),
            message: format!("invalid log level '{}'", level),
        })
}
