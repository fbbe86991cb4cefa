//! # Registry Infrastructure
//!
//! Registration, lookup and removal of drag sources and drop targets.
//!
//! ## Architecture
//!
//! ```text
//! HandlerRegistry            (role-checked facade, notifications)
//! ├── contract               (capability and type validation)
//! ├── RegistryStore          (id -> handler, id -> type)
//! │   └── IdAllocator        (role-prefixed monotonic ids)
//! └── PinManager             (one source snapshot outside the store)
//! ```
//!
//! A registration validates first, then stores under a freshly minted id,
//! then queues a notification for the action dispatcher. Removal mirrors
//! it. Every failure is reported before anything is mutated.

pub mod contract;
pub mod handler;
pub mod handler_id;
pub mod handler_registry;
pub mod pin;
pub mod store;
pub mod types;

// Re-export main types for easy access
pub use contract::{validate_source, validate_target, validate_type};
pub use handler::{Capability, DragSource, DropTarget, DynamicSource, DynamicTarget, Handler};
pub use handler_id::{HandlerId, IdAllocator, Role};
pub use handler_registry::HandlerRegistry;
pub use pin::{PinManager, PinPolicy};
pub use store::{RegistryStats, RegistryStore};
pub use types::{HandlerType, Symbol, TypeTag, TypeValue};
