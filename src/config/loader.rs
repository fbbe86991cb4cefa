//! Configuration Loader
//!
//! Environment-aware loading: detects the environment, layers the base and
//! environment TOML files under `DND__*` overrides, then validates.

use super::RegistryConfig;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_STEM: &str = "dnd-registry";
const ENV_PREFIX: &str = "DND";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RegistryConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> Result<ConfigManager> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> Result<ConfigManager> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> Result<ConfigManager> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));
        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            environment = environment,
            config_directory = %config_directory.display(),
            "Loading registry configuration"
        );

        let config: RegistryConfig = config::Config::builder()
            .add_source(config::File::from(base_file).required(false))
            .add_source(config::File::from(env_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_override("environment", environment)?
            .build()?
            .try_deserialize()?;

        config.validate()?;

        crate::log_config!(debug, "Configuration loaded",
            environment: environment,
            notifications_enabled: config.notifications.enabled,
            pin_policy: config.pinning.policy,
            log_level: config.log_level()
        );

        Ok(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect current environment from environment variables
    pub fn detect_environment() -> String {
        crate::logging::detect_environment()
    }
}
