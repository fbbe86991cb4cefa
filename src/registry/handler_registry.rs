//! # Handler Registry
//!
//! Role-specific facade over the store and pin slot.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnd_registry::events::Actions;
//! use dnd_registry::registry::{DragSource, HandlerId, HandlerRegistry};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Card;
//!
//! impl DragSource for Card {
//!     fn can_drag(&self) -> bool { true }
//!     fn begin_drag(&self) -> Value { json!({ "id": 1 }) }
//!     fn end_drag(&self) {}
//! }
//!
//! struct Host;
//!
//! #[async_trait::async_trait]
//! impl Actions for Host {
//!     async fn add_source(&self, _id: &HandlerId) {}
//!     async fn add_target(&self, _id: &HandlerId) {}
//!     async fn remove_source(&self, _id: &HandlerId) {}
//!     async fn remove_target(&self, _id: &HandlerId) {}
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = HandlerRegistry::new(Arc::new(Host))?;
//!
//! let id = registry.add_source("card", Arc::new(Card))?;
//! registry.pin_source(&id)?;
//! registry.remove_source(&id)?;
//!
//! // Still reachable through the pin
//! assert!(registry.get_source(&id, true)?.is_some());
//! registry.unpin_source()?;
//! # Ok(())
//! # }
//! ```

use super::contract::{validate_source, validate_target, validate_type};
use super::handler::{DragSource, DropTarget, Handler};
use super::handler_id::{HandlerId, Role};
use super::pin::PinManager;
use super::store::{RegistryStats, RegistryStore};
use super::types::{HandlerType, TypeTag, TypeValue};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::events::{ActionDispatcher, Actions, NotificationQueue, RegistryEvent};
use crate::log_registry;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;

/// Store and pin slot, mutated together under one lock
#[derive(Debug)]
struct RegistryState {
    store: RegistryStore,
    pins: PinManager,
}

/// Registry of drag sources and drop targets
pub struct HandlerRegistry {
    state: RwLock<RegistryState>,
    notifications: NotificationQueue,
    dispatcher: Option<JoinHandle<u64>>,
}

impl HandlerRegistry {
    /// Create a registry with default configuration
    ///
    /// Spawns the notification dispatcher, so this must run inside a
    /// current-thread Tokio runtime.
    pub fn new(actions: Arc<dyn Actions>) -> Result<Self> {
        Self::with_config(&RegistryConfig::default(), actions)
    }

    /// Create a registry from configuration
    ///
    /// A runtime is only required while notifications are enabled, and it
    /// must be a current-thread runtime: the dispatcher then only runs once
    /// the calling task yields, never alongside the call that queued the
    /// event. Registry calls must come from the runtime's own thread. On a
    /// multi-thread runtime use [`HandlerRegistry::from_parts`] and drive
    /// the [`ActionDispatcher`] yourself.
    pub fn with_config(config: &RegistryConfig, actions: Arc<dyn Actions>) -> Result<Self> {
        if !config.notifications.enabled {
            return Ok(Self::from_parts(config, NotificationQueue::disabled()));
        }

        let runtime = Handle::try_current().map_err(|e| {
            RegistryError::Runtime(format!("handler registry needs a Tokio runtime: {e}"))
        })?;
        let flavor = runtime.runtime_flavor();
        if flavor != RuntimeFlavor::CurrentThread {
            return Err(RegistryError::Runtime(format!(
                "handler registry needs a current-thread Tokio runtime, found {flavor:?}"
            )));
        }

        let (queue, receiver) = NotificationQueue::new();
        let dispatcher = ActionDispatcher::new(receiver, actions).spawn();

        let mut registry = Self::from_parts(config, queue);
        registry.dispatcher = Some(dispatcher);
        Ok(registry)
    }

    /// Create a registry around an existing queue
    ///
    /// The caller owns delivery: run an [`ActionDispatcher`] on the matching
    /// receiver however it sees fit.
    pub fn from_parts(config: &RegistryConfig, notifications: NotificationQueue) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                store: RegistryStore::new(),
                pins: PinManager::new(config.pinning.policy),
            }),
            notifications,
            dispatcher: None,
        }
    }

    pub fn add_source(
        &self,
        ty: impl Into<TypeValue>,
        source: Arc<dyn DragSource>,
    ) -> Result<HandlerId> {
        let ty = validate_type(&ty.into(), false)?;
        validate_source(source.as_ref())?;
        Ok(self.add_handler(Role::Source, ty, Handler::Source(source)))
    }

    /// Register a target listening on one tag or a sequence of tags
    pub fn add_target(
        &self,
        ty: impl Into<TypeValue>,
        target: Arc<dyn DropTarget>,
    ) -> Result<HandlerId> {
        let ty = validate_type(&ty.into(), true)?;
        validate_target(target.as_ref())?;
        Ok(self.add_handler(Role::Target, ty, Handler::Target(target)))
    }

    fn add_handler(&self, role: Role, ty: HandlerType, handler: Handler) -> HandlerId {
        let mut state = self.state.write();
        let id = state.store.add_handler(role, ty, handler);
        // Queue order follows mutation order
        self.notifications.publish(RegistryEvent::added(role, id.clone()));
        drop(state);

        log_registry!(debug, "add_handler", handler_id: id, role: role);
        id
    }

    pub fn remove_source(&self, id: &HandlerId) -> Result<()> {
        self.remove_handler(id, Role::Source)
    }

    pub fn remove_target(&self, id: &HandlerId) -> Result<()> {
        self.remove_handler(id, Role::Target)
    }

    fn remove_handler(&self, id: &HandlerId, role: Role) -> Result<()> {
        expect_role(id, role)?;
        let mut state = self.state.write();
        state.store.remove(id)?;
        self.notifications.publish(RegistryEvent::removed(role, id.clone()));
        drop(state);

        log_registry!(debug, "remove_handler", handler_id: id, role: role);
        Ok(())
    }

    /// Look up a source, consulting the pin first when `include_pinned` is set
    pub fn get_source(
        &self,
        id: &HandlerId,
        include_pinned: bool,
    ) -> Result<Option<Arc<dyn DragSource>>> {
        expect_role(id, Role::Source)?;
        let state = self.state.read();

        if let Some(pinned) = state.pins.resolve_pinned(id, include_pinned) {
            return Ok(Some(pinned));
        }
        Ok(state.store.get(id).and_then(Handler::as_source).cloned())
    }

    pub fn get_target(&self, id: &HandlerId) -> Result<Option<Arc<dyn DropTarget>>> {
        expect_role(id, Role::Target)?;
        Ok(self
            .state
            .read()
            .store
            .get(id)
            .and_then(Handler::as_target)
            .cloned())
    }

    pub fn get_source_type(&self, id: &HandlerId) -> Result<Option<TypeTag>> {
        expect_role(id, Role::Source)?;
        Ok(self
            .state
            .read()
            .store
            .get_type(id)
            .and_then(HandlerType::as_single)
            .cloned())
    }

    pub fn get_target_type(&self, id: &HandlerId) -> Result<Option<HandlerType>> {
        expect_role(id, Role::Target)?;
        Ok(self.state.read().store.get_type(id).cloned())
    }

    /// Whether `id` is shaped as a source id; registration is not checked
    pub fn is_source_id(&self, id: &HandlerId) -> bool {
        id.has_role(Role::Source)
    }

    /// Whether `id` is shaped as a target id; registration is not checked
    pub fn is_target_id(&self, id: &HandlerId) -> bool {
        id.has_role(Role::Target)
    }

    /// Pin a live source so it stays reachable after removal
    pub fn pin_source(&self, id: &HandlerId) -> Result<()> {
        expect_role(id, Role::Source)?;
        let mut state = self.state.write();

        let source = state
            .store
            .get(id)
            .and_then(Handler::as_source)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownHandler {
                id: id.clone(),
                role: Role::Source,
            })?;
        state.pins.pin(id.clone(), source)?;

        log_registry!(debug, "pin_source", handler_id: id, role: Role::Source);
        Ok(())
    }

    /// Release the pin, returning the id that was pinned
    pub fn unpin_source(&self) -> Result<HandlerId> {
        let id = self.state.write().pins.unpin()?;

        log_registry!(debug, "unpin_source", handler_id: id, role: Role::Source);
        Ok(id)
    }

    pub fn pinned_source_id(&self) -> Option<HandlerId> {
        self.state.read().pins.pinned_id().cloned()
    }

    /// True when `handler` is currently registered under any id
    pub fn contains(&self, handler: &Handler) -> bool {
        self.state.read().store.contains(handler)
    }

    /// Registered ids of `role`, oldest first
    pub fn ids(&self, role: Role) -> Vec<HandlerId> {
        self.state.read().store.ids(role)
    }

    pub fn stats(&self) -> RegistryStats {
        let state = self.state.read();
        RegistryStats {
            pinned: state.pins.is_pinned(),
            ..state.store.stats()
        }
    }

    /// Stop accepting notifications and wait for queued ones to be delivered
    ///
    /// Returns how many notifications the dispatcher delivered in total.
    pub async fn close(self) -> Result<u64> {
        let Self {
            notifications,
            dispatcher,
            ..
        } = self;
        drop(notifications);

        match dispatcher {
            Some(handle) => handle
                .await
                .map_err(|e| RegistryError::Runtime(format!("action dispatcher failed: {e}"))),
            None => Ok(0),
        }
    }
}

fn expect_role(id: &HandlerId, expected: Role) -> Result<()> {
    let actual = id.role()?;
    if actual == expected {
        Ok(())
    } else {
        Err(RegistryError::RoleMismatch {
            id: id.clone(),
            expected,
            actual,
        })
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("stats", &self.stats())
            .field("notifications_enabled", &self.notifications.is_enabled())
            .finish()
    }
}
