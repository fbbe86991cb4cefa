//! # Registry Configuration
//!
//! Layered configuration for the registry and its ambient services.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/dnd-registry.toml` (optional)
//! 3. `config/dnd-registry.<environment>.toml` (optional)
//! 4. `DND__*` environment variables, `__` separating nested keys
//!    (`DND__PINNING__POLICY=overwrite`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnd_registry::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let policy = manager.config().pinning.policy;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::error::{RegistryError, Result};
use crate::registry::PinPolicy;
use serde::Deserialize;

pub use loader::ConfigManager;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Deployment environment; picks the overlay file and the default log level
    pub environment: String,

    pub notifications: NotificationConfig,

    pub pinning: PinningConfig,

    pub logging: LoggingConfig,
}

/// Delivery of registration changes to the action layer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PinningConfig {
    pub policy: PinPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit level; `None` derives one from the environment
    pub level: Option<String>,
    pub format: LogFormat,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(RegistryError::Configuration(format!(
                    "Unknown log level '{level}', expected one of {}",
                    LOG_LEVELS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Log level in effect: explicit setting, else derived from the environment
    pub fn log_level(&self) -> String {
        self.logging
            .level
            .clone()
            .map(|level| level.to_lowercase())
            .unwrap_or_else(|| crate::logging::level_for_environment(&self.environment).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();

        assert!(config.notifications.enabled);
        assert_eq!(config.pinning.policy, PinPolicy::Strict);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let mut config = RegistryConfig::default();
        config.logging.level = Some("loud".to_string());

        assert!(matches!(
            config.validate(),
            Err(RegistryError::Configuration(msg)) if msg.contains("loud")
        ));
    }

    #[test]
    fn test_log_level_falls_back_to_environment() {
        let mut config = RegistryConfig {
            environment: "production".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), "info");

        config.logging.level = Some("WARN".to_string());
        assert_eq!(config.log_level(), "warn");
    }
}
