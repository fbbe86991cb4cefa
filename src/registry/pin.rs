//! # Source Pinning
//!
//! Holds at most one source snapshot outside the live store, so an in-flight
//! interaction can keep reaching its originating source after that source
//! has been unregistered.

use super::handler::DragSource;
use super::handler_id::HandlerId;
use crate::error::{RegistryError, Result};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// What pinning does when a source is already pinned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPolicy {
    /// Re-pinning fails with [`RegistryError::AlreadyPinned`]
    #[default]
    Strict,
    /// Re-pinning replaces the current pin
    Overwrite,
}

#[derive(Clone)]
struct PinnedSource {
    id: HandlerId,
    source: Arc<dyn DragSource>,
}

#[derive(Default)]
pub struct PinManager {
    policy: PinPolicy,
    pinned: Option<PinnedSource>,
}

impl PinManager {
    pub fn new(policy: PinPolicy) -> Self {
        Self {
            policy,
            pinned: None,
        }
    }

    /// Pin `source` under `id`
    ///
    /// The caller resolves `source` from the live store first.
    pub fn pin(&mut self, id: HandlerId, source: Arc<dyn DragSource>) -> Result<()> {
        if let Some(current) = &self.pinned {
            match self.policy {
                PinPolicy::Strict => {
                    return Err(RegistryError::AlreadyPinned {
                        pinned: current.id.clone(),
                        requested: id,
                    });
                }
                PinPolicy::Overwrite => {
                    warn!(
                        pinned = %current.id,
                        requested = %id,
                        "Replacing pinned source"
                    );
                }
            }
        }

        self.pinned = Some(PinnedSource { id, source });
        Ok(())
    }

    /// Clear the pin, returning the id that was pinned
    pub fn unpin(&mut self) -> Result<HandlerId> {
        self.pinned
            .take()
            .map(|pinned| pinned.id)
            .ok_or(RegistryError::NotPinned)
    }

    /// The pinned handler, when `include_pinned` is set and `id` is the pinned id
    pub fn resolve_pinned(
        &self,
        id: &HandlerId,
        include_pinned: bool,
    ) -> Option<Arc<dyn DragSource>> {
        if !include_pinned {
            return None;
        }
        self.pinned
            .as_ref()
            .filter(|pinned| &pinned.id == id)
            .map(|pinned| pinned.source.clone())
    }

    pub fn pinned_id(&self) -> Option<&HandlerId> {
        self.pinned.as_ref().map(|pinned| &pinned.id)
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }
}

impl std::fmt::Debug for PinManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinManager")
            .field("policy", &self.policy)
            .field("pinned_id", &self.pinned_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler::DynamicSource;

    fn source() -> Arc<dyn DragSource> {
        Arc::new(DynamicSource::new())
    }

    #[test]
    fn test_resolve_only_matches_pinned_id_when_requested() {
        let mut pins = PinManager::default();
        let pinned = source();
        pins.pin(HandlerId::from("S0"), pinned.clone()).unwrap();

        let resolved = pins.resolve_pinned(&HandlerId::from("S0"), true).unwrap();
        assert!(Arc::ptr_eq(&resolved, &pinned));
        assert!(pins.resolve_pinned(&HandlerId::from("S0"), false).is_none());
        assert!(pins.resolve_pinned(&HandlerId::from("S2"), true).is_none());
    }

    #[test]
    fn test_strict_policy_rejects_second_pin() {
        let mut pins = PinManager::new(PinPolicy::Strict);
        pins.pin(HandlerId::from("S0"), source()).unwrap();

        let result = pins.pin(HandlerId::from("S1"), source());

        assert_eq!(
            result,
            Err(RegistryError::AlreadyPinned {
                pinned: HandlerId::from("S0"),
                requested: HandlerId::from("S1"),
            })
        );
        assert_eq!(pins.pinned_id(), Some(&HandlerId::from("S0")));
    }

    #[test]
    fn test_overwrite_policy_replaces_pin() {
        let mut pins = PinManager::new(PinPolicy::Overwrite);
        pins.pin(HandlerId::from("S0"), source()).unwrap();
        pins.pin(HandlerId::from("S1"), source()).unwrap();

        assert_eq!(pins.pinned_id(), Some(&HandlerId::from("S1")));
    }

    #[test]
    fn test_unpin_requires_a_pin() {
        let mut pins = PinManager::default();
        assert_eq!(pins.unpin(), Err(RegistryError::NotPinned));

        pins.pin(HandlerId::from("S4"), source()).unwrap();
        assert_eq!(pins.unpin(), Ok(HandlerId::from("S4")));
        assert!(!pins.is_pinned());
        assert_eq!(pins.unpin(), Err(RegistryError::NotPinned));
    }
}
