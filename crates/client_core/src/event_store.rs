use shared::domain::{Event, EventId};

/// Conversation summaries, newest first.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn add(&mut self, event: Event) {
        self.events.insert(0, event);
    }

    /// Returns whether an event was actually removed.
    pub fn remove(&mut self, event_id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|event| event.id != event_id);
        self.events.len() != before
    }

    pub fn get(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == event_id)
    }

    pub fn contains(&self, event_id: EventId) -> bool {
        self.get(event_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
