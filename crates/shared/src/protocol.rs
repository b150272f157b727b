use serde::{Deserialize, Serialize};

use crate::domain::{Event, EventId, Message};

/// Signals published on the notification bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    /// Delete a conversation once the user confirmed it.
    ClearConversation { chat_id: EventId },
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub events: Vec<Event>,
    pub selected_event_id: Option<EventId>,
    pub transcript: Vec<Message>,
}

impl ConversationSnapshot {
    pub fn is_landing(&self) -> bool {
        self.selected_event_id.is_none()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let selected = self.selected_event_id?;
        self.events.iter().find(|event| event.id == selected)
    }
}
