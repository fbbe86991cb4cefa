//! # Registry Store
//!
//! Id-keyed storage for handlers and their types. The two maps always hold
//! the same key set: entries enter and leave both together.
//!
//! The store does no validation and no locking of its own; the facade
//! validates first and holds the store behind one lock.

use super::handler::Handler;
use super::handler_id::{HandlerId, IdAllocator, Role};
use super::types::HandlerType;
use crate::error::{RegistryError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub sources: usize,
    pub targets: usize,
    pub pinned: bool,
}

#[derive(Debug, Default)]
pub struct RegistryStore {
    allocator: IdAllocator,
    types: HashMap<HandlerId, HandlerType>,
    handlers: HashMap<HandlerId, Handler>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an id for `role` and record the handler under it
    pub fn add_handler(&mut self, role: Role, ty: HandlerType, handler: Handler) -> HandlerId {
        let id = self.allocator.next_id(role);
        self.types.insert(id.clone(), ty);
        self.handlers.insert(id.clone(), handler);
        id
    }

    pub fn get(&self, id: &HandlerId) -> Option<&Handler> {
        self.handlers.get(id)
    }

    pub fn get_type(&self, id: &HandlerId) -> Option<&HandlerType> {
        self.types.get(id)
    }

    /// Delete both entries for `id`; an unknown id is a caller error
    pub fn remove(&mut self, id: &HandlerId) -> Result<Handler> {
        let role = self.allocator.role_of(id)?;
        let handler = self
            .handlers
            .remove(id)
            .ok_or_else(|| RegistryError::UnknownHandler {
                id: id.clone(),
                role,
            })?;
        self.types.remove(id);
        Ok(handler)
    }

    /// True when `handler` is stored under any id (reference equality)
    pub fn contains(&self, handler: &Handler) -> bool {
        self.handlers
            .values()
            .any(|stored| stored.same_handler(handler))
    }

    /// Ids of one role, in registration order
    pub fn ids(&self, role: Role) -> Vec<HandlerId> {
        let mut ids: Vec<(u64, HandlerId)> = self
            .handlers
            .iter()
            .filter(|(_, handler)| handler.role() == role)
            .filter_map(|(id, _)| {
                let sequence = id.as_str().get(1..)?.parse::<u64>().ok()?;
                Some((sequence, id.clone()))
            })
            .collect();
        ids.sort_unstable_by_key(|(sequence, _)| *sequence);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        let sources = self
            .handlers
            .values()
            .filter(|handler| handler.role() == Role::Source)
            .count();
        RegistryStats {
            sources,
            targets: self.handlers.len() - sources,
            pinned: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler::{DragSource, DynamicSource, DynamicTarget};
    use std::sync::Arc;

    fn source() -> Handler {
        Handler::Source(Arc::new(DynamicSource::new()))
    }

    fn target() -> Handler {
        Handler::Target(Arc::new(DynamicTarget::new()))
    }

    #[test]
    fn test_add_and_get_keep_maps_in_step() {
        let mut store = RegistryStore::new();
        let handler = source();

        let id = store.add_handler(Role::Source, HandlerType::Single("card".into()), handler.clone());

        assert!(store.get(&id).unwrap().same_handler(&handler));
        assert_eq!(store.get_type(&id), Some(&HandlerType::Single("card".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_clears_both_entries() {
        let mut store = RegistryStore::new();
        let id = store.add_handler(Role::Target, HandlerType::Single("card".into()), target());

        store.remove(&id).unwrap();

        assert!(store.get(&id).is_none());
        assert!(store.get_type(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_an_error() {
        let mut store = RegistryStore::new();

        assert_eq!(
            store.remove(&HandlerId::from("T9")).unwrap_err(),
            RegistryError::UnknownHandler {
                id: HandlerId::from("T9"),
                role: Role::Target,
            }
        );
        assert!(matches!(
            store.remove(&HandlerId::from("Q1")),
            Err(RegistryError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_contains_uses_reference_equality() {
        let mut store = RegistryStore::new();
        let inner: Arc<dyn DragSource> = Arc::new(DynamicSource::new());
        store.add_handler(
            Role::Source,
            HandlerType::Single("card".into()),
            Handler::Source(inner.clone()),
        );

        assert!(store.contains(&Handler::Source(inner)));
        assert!(!store.contains(&source()));
    }

    #[test]
    fn test_ids_are_listed_in_registration_order() {
        let mut store = RegistryStore::new();
        let ty = || HandlerType::Single("card".into());

        let mut expected = Vec::new();
        for _ in 0..12 {
            expected.push(store.add_handler(Role::Source, ty(), source()));
            store.add_handler(Role::Target, ty(), target());
        }

        assert_eq!(store.ids(Role::Source), expected);
        assert_eq!(store.stats(), RegistryStats { sources: 12, targets: 12, pinned: false });
    }
}
