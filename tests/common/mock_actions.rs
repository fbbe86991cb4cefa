use async_trait::async_trait;
use dnd_registry::{Actions, HandlerId, RegistryEvent, Role};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Action layer that forwards every notification into a channel
///
/// Tests hold the receiver and await deliveries in order.
#[derive(Debug)]
pub struct MockActions {
    sender: mpsc::UnboundedSender<RegistryEvent>,
}

impl MockActions {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<RegistryEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }

    fn record(&self, event: RegistryEvent) {
        let _ = self.sender.send(event);
    }
}

#[async_trait]
impl Actions for MockActions {
    async fn add_source(&self, id: &HandlerId) {
        self.record(RegistryEvent::added(Role::Source, id.clone()));
    }

    async fn add_target(&self, id: &HandlerId) {
        self.record(RegistryEvent::added(Role::Target, id.clone()));
    }

    async fn remove_source(&self, id: &HandlerId) {
        self.record(RegistryEvent::removed(Role::Source, id.clone()));
    }

    async fn remove_target(&self, id: &HandlerId) {
        self.record(RegistryEvent::removed(Role::Target, id.clone()));
    }
}

/// Drain everything already delivered without waiting
pub fn drain(receiver: &mut mpsc::UnboundedReceiver<RegistryEvent>) -> Vec<RegistryEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
