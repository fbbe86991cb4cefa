//! # Contract Validation
//!
//! Registration-time checks for handler shape and type tags. Failures here
//! are integration bugs; they are surfaced before anything is stored.

use super::handler::{Capability, DragSource, DropTarget};
use super::handler_id::Role;
use super::types::{HandlerType, TypeTag, TypeValue};
use crate::error::{RegistryError, Result};

/// Check that `source` provides every source capability
pub fn validate_source(source: &dyn DragSource) -> Result<()> {
    require_capabilities(Role::Source, &source.capabilities())
}

/// Check that `target` provides every target capability
pub fn validate_target(target: &dyn DropTarget) -> Result<()> {
    require_capabilities(Role::Target, &target.capabilities())
}

fn require_capabilities(role: Role, provided: &[Capability]) -> Result<()> {
    let missing: Vec<Capability> = Capability::required_for(role)
        .iter()
        .copied()
        .filter(|required| !provided.contains(required))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::MissingCapabilities { role, missing })
    }
}

/// Validate a type, allowing a sequence of tags only when `allow_many` is set
///
/// Sequence members go through the single-tag check, so nested sequences
/// are rejected.
pub fn validate_type(value: &TypeValue, allow_many: bool) -> Result<HandlerType> {
    match value {
        TypeValue::Seq(items) if allow_many => {
            let tags = items.iter().map(validate_tag).collect::<Result<Vec<_>>>()?;
            Ok(HandlerType::Many(tags))
        }
        single => validate_tag(single).map(HandlerType::Single),
    }
}

fn validate_tag(value: &TypeValue) -> Result<TypeTag> {
    match value {
        TypeValue::Tag(tag) => Ok(tag.clone()),
        TypeValue::Seq(_) => Err(RegistryError::InvalidType(
            "expected a string or symbol, got a sequence".to_string(),
        )),
        TypeValue::Other(other) => Err(RegistryError::InvalidType(format!(
            "expected a string or symbol, got {other}"
        ))),
    }
}
