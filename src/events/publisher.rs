use crate::registry::{HandlerId, Role};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// A registration change the action layer is told about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "handler_id", rename_all = "snake_case")]
pub enum RegistryEvent {
    SourceAdded(HandlerId),
    TargetAdded(HandlerId),
    SourceRemoved(HandlerId),
    TargetRemoved(HandlerId),
}

impl RegistryEvent {
    pub fn added(role: Role, id: HandlerId) -> Self {
        match role {
            Role::Source => RegistryEvent::SourceAdded(id),
            Role::Target => RegistryEvent::TargetAdded(id),
        }
    }

    pub fn removed(role: Role, id: HandlerId) -> Self {
        match role {
            Role::Source => RegistryEvent::SourceRemoved(id),
            Role::Target => RegistryEvent::TargetRemoved(id),
        }
    }

    pub fn handler_id(&self) -> &HandlerId {
        match self {
            RegistryEvent::SourceAdded(id)
            | RegistryEvent::TargetAdded(id)
            | RegistryEvent::SourceRemoved(id)
            | RegistryEvent::TargetRemoved(id) => id,
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            RegistryEvent::SourceAdded(_) => "source.added",
            RegistryEvent::TargetAdded(_) => "target.added",
            RegistryEvent::SourceRemoved(_) => "source.removed",
            RegistryEvent::TargetRemoved(_) => "target.removed",
        }
    }
}

/// Event that has been queued for delivery
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub event: RegistryEvent,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Sending half of the notification queue
///
/// Publishing never blocks and never awaits. A disabled queue drops
/// everything it is given.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: Option<mpsc::UnboundedSender<PublishedEvent>>,
}

impl NotificationQueue {
    /// Create a queue and the receiver the dispatcher drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PublishedEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queue `event` for delivery after the current call returns
    pub fn publish(&self, event: RegistryEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        let name = event.event_name();
        let published = PublishedEvent {
            event,
            published_at: chrono::Utc::now(),
        };

        // A closed channel means the dispatcher is gone; nobody is left to tell
        if sender.send(published).is_err() {
            debug!(event = name, "Notification dropped: dispatcher has stopped");
        }
    }
}
