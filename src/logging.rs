//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem, plus the
//! domain macros the registry logs through.
//!
//! `RUST_LOG` wins when set; otherwise the level comes from configuration or
//! the detected environment.

use crate::config::{LogFormat, RegistryConfig};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging from the environment alone
pub fn init_structured_logging() {
    let config = RegistryConfig {
        environment: detect_environment(),
        ..Default::default()
    };
    init_from_config(&config);
}

/// Initialize logging from loaded configuration
///
/// Only the first call in a process has any effect, and an already
/// installed global subscriber is left alone.
pub fn init_from_config(config: &RegistryConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = config.log_level();
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
        let use_ansi = std::io::stdout().is_terminal();

        let console_layer = match config.logging.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed(),
        };

        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %config.environment,
                log_level = %log_level,
                format = ?config.logging.format,
                "Structured logging initialized"
            );
        }
    });
}

/// Get current environment from environment variables
pub fn detect_environment() -> String {
    std::env::var("DND_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
        .to_lowercase()
}

/// Get log level based on environment
pub fn level_for_environment(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log registry operations with handler id and role
#[macro_export]
macro_rules! log_registry {
    // Full form with handler id and role
    ($level:ident, $operation:expr, handler_id: $id:expr, role: $role:expr $(, $key:ident: $value:expr)* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            handler_id = %$id,
            role = %$role,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{} ({} {})", $operation, $role, $id
        );
    };
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
}

/// Log configuration events
#[macro_export]
macro_rules! log_config {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(level_for_environment("test"), "debug");
        assert_eq!(level_for_environment("development"), "debug");
        assert_eq!(level_for_environment("production"), "info");
        assert_eq!(level_for_environment("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_structured_logging();
        init_from_config(&RegistryConfig::default());

        crate::log_registry!(debug, "logging smoke test");
        crate::log_config!(debug, "logging smoke test", attempt: 2);
    }
}
