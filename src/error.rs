//! Error types for the handler registry.
//!
//! Every variant is a precondition violation: the operation that returns it
//! has not touched the store, the pin slot or the notification queue.

use crate::registry::{Capability, HandlerId, Role};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("{} is missing required capabilities: {}", .role, format_capabilities(.missing))]
    MissingCapabilities {
        role: Role,
        missing: Vec<Capability>,
    },
    #[error("Unrecognized handler id prefix in '{0}'")]
    UnknownPrefix(String),
    #[error("Expected a {expected} id, got {actual} id '{id}'")]
    RoleMismatch {
        id: HandlerId,
        expected: Role,
        actual: Role,
    },
    #[error("No registered {role} for id '{id}'")]
    UnknownHandler { id: HandlerId, role: Role },
    #[error("Cannot pin '{requested}': source '{pinned}' is already pinned")]
    AlreadyPinned {
        pinned: HandlerId,
        requested: HandlerId,
    },
    #[error("Cannot unpin: no source is pinned")]
    NotPinned,
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn format_capabilities(missing: &[Capability]) -> String {
    missing
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<config::ConfigError> for RegistryError {
    fn from(error: config::ConfigError) -> Self {
        RegistryError::Configuration(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
