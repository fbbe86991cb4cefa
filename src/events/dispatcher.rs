use super::publisher::{PublishedEvent, RegistryEvent};
use crate::registry::HandlerId;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Host action layer told about registration changes
///
/// Calls are notifications; nothing they return is inspected.
#[async_trait]
pub trait Actions: Send + Sync {
    async fn add_source(&self, id: &HandlerId);

    async fn add_target(&self, id: &HandlerId);

    async fn remove_source(&self, id: &HandlerId);

    async fn remove_target(&self, id: &HandlerId);
}

/// Drains the notification queue into an [`Actions`] implementation
pub struct ActionDispatcher {
    receiver: mpsc::UnboundedReceiver<PublishedEvent>,
    actions: Arc<dyn Actions>,
}

impl ActionDispatcher {
    pub fn new(receiver: mpsc::UnboundedReceiver<PublishedEvent>, actions: Arc<dyn Actions>) -> Self {
        Self { receiver, actions }
    }

    /// Run on the current Tokio runtime
    ///
    /// Panics outside a runtime, like [`tokio::spawn`].
    pub fn spawn(self) -> JoinHandle<u64> {
        tokio::spawn(self.run())
    }

    /// Deliver events one at a time until every queue handle is dropped
    ///
    /// Returns the number of events delivered.
    pub async fn run(mut self) -> u64 {
        info!("Action dispatcher started");
        let mut delivered = 0u64;

        while let Some(published) = self.receiver.recv().await {
            debug!(
                event = published.event.event_name(),
                handler_id = %published.event.handler_id(),
                queued_us = (chrono::Utc::now() - published.published_at).num_microseconds(),
                "Delivering registry notification"
            );
            self.deliver(&published.event).await;
            delivered += 1;
        }

        info!(delivered, "Action dispatcher stopped");
        delivered
    }

    async fn deliver(&self, event: &RegistryEvent) {
        match event {
            RegistryEvent::SourceAdded(id) => self.actions.add_source(id).await,
            RegistryEvent::TargetAdded(id) => self.actions.add_target(id).await,
            RegistryEvent::SourceRemoved(id) => self.actions.remove_source(id).await,
            RegistryEvent::TargetRemoved(id) => self.actions.remove_target(id).await,
        }
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("actions", &"<Arc<dyn Actions>>".to_string())
            .finish()
    }
}
