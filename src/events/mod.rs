//! # Registry Notifications
//!
//! Deferred delivery of registration changes to the host's action layer.
//!
//! Registry operations push a [`RegistryEvent`] onto the
//! [`NotificationQueue`] while still holding the store lock, so queue order
//! matches mutation order. The [`ActionDispatcher`] runs as its own Tokio
//! task and forwards events to an [`Actions`] implementation in queue order.
//! On a current-thread runtime the dispatcher can only run once the calling
//! task yields, so side effects never overlap the code that caused them.

pub mod dispatcher;
pub mod publisher;

pub use dispatcher::{ActionDispatcher, Actions};
pub use publisher::{NotificationQueue, PublishedEvent, RegistryEvent};
