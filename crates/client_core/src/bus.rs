use shared::{domain::EventId, protocol::Notification};
use tokio::sync::broadcast;
use tracing::{debug, warn};

const DEFAULT_BUS_CAPACITY: usize = 64;

/// Broadcast channel decoupling delete requests from the state owner.
#[derive(Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns the number of listeners that received the notification.
    pub fn publish(&self, notification: Notification) -> usize {
        match self.sender.send(notification) {
            Ok(listeners) => {
                debug!(listeners, "published notification");
                listeners
            }
            Err(broadcast::error::SendError(notification)) => {
                warn!(?notification, "notification published with no listeners");
                0
            }
        }
    }

    pub fn clear_conversation(&self, chat_id: EventId) -> usize {
        self.publish(Notification::ClearConversation { chat_id })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_clear_conversation_to_subscribers() {
        let bus = NotificationBus::new();
        let mut receiver = bus.subscribe();

        assert_eq!(bus.clear_conversation(EventId(9)), 1);
        assert_eq!(
            receiver.recv().await.expect("notification"),
            Notification::ClearConversation {
                chat_id: EventId(9)
            }
        );
    }

    #[test]
    fn publishing_without_listeners_is_harmless() {
        let bus = NotificationBus::new();
        assert_eq!(bus.clear_conversation(EventId(1)), 0);
    }
}
