#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # DnD Registry
//!
//! Handler registry for drag-and-drop style interactions.
//!
//! ## Overview
//!
//! Sources (participants that start an interaction and supply a payload) and
//! targets (participants that receive one) are registered under role-tagged
//! ids together with the type tags that decide which sources may meet which
//! targets. A source can be pinned for the length of one interaction so it
//! stays reachable even if it is unregistered mid-flight.
//!
//! Registration changes are forwarded to the host's [`events::Actions`]
//! layer from a separate Tokio task, after the calling task yields. The
//! task is spawned on a current-thread runtime; multi-thread runtimes are
//! rejected unless the caller drives the dispatcher itself.
//!
//! ## Module Organization
//!
//! - [`registry`] - Ids, handler contracts, store, pinning and the facade
//! - [`events`] - Deferred notification queue and dispatcher
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup and macros
//! - [`error`] - Structured error handling
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;

pub use config::{ConfigManager, RegistryConfig};
pub use error::{RegistryError, Result};
pub use events::{ActionDispatcher, Actions, NotificationQueue, RegistryEvent};
pub use registry::{
    DragSource, DropTarget, Handler, HandlerId, HandlerRegistry, HandlerType, PinPolicy, Role,
    TypeTag,
};
