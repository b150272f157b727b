//! Conversation state machine: pure transitions that return the effects to run.

use std::collections::HashMap;

use shared::{
    domain::{Event, EventId, Message, MessageId},
    protocol::ConversationSnapshot,
};
use tracing::{debug, info, warn};

use crate::{clock::Clock, clock::IdSequence, event_store::EventStore, replies, title::TitlePolicy};

/// Ids used when a transcript is rebuilt from a stored event.
pub const RESTORED_PROMPT_ID: MessageId = MessageId(1);
pub const RESTORED_REPLY_ID: MessageId = MessageId(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    New,
    Event(EventId),
}

/// A simulated reply waiting for its delay to elapse. It belongs to `event_id`, not to whatever is
/// displayed when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub event_id: EventId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendMessage(String),
    SelectConversation(Selection),
    DeleteConversation(EventId),
    DeliverReply(PendingReply),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleReply(PendingReply),
    CancelReplies(EventId),
    Render,
}

#[derive(Debug, Default)]
pub struct ConversationState {
    events: EventStore,
    selected_event_id: Option<EventId>,
    transcript: Vec<Message>,
    /// Replies that fired while their event was not displayed.
    background_replies: HashMap<EventId, Vec<Message>>,
    ids: IdSequence,
    title_policy: TitlePolicy,
}

impl ConversationState {
    pub fn new(title_policy: TitlePolicy) -> Self {
        Self {
            title_policy,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn selected_event_id(&self) -> Option<EventId> {
        self.selected_event_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn background_replies(&self, event_id: EventId) -> &[Message] {
        self.background_replies
            .get(&event_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            events: self.events.list().to_vec(),
            selected_event_id: self.selected_event_id,
            transcript: self.transcript.clone(),
        }
    }

    fn replace_transcript(&mut self, selected: Option<EventId>, transcript: Vec<Message>) {
        self.selected_event_id = selected;
        self.transcript = transcript;
    }

    fn next_message_id(&mut self, clock: &dyn Clock) -> MessageId {
        MessageId(self.ids.next(clock.epoch_millis()))
    }
}

pub fn reduce(state: &mut ConversationState, action: Action, clock: &dyn Clock) -> Vec<Effect> {
    match action {
        Action::SendMessage(text) => send_message(state, text, clock),
        Action::SelectConversation(selection) => select_conversation(state, selection),
        Action::DeleteConversation(event_id) => delete_conversation(state, event_id),
        Action::DeliverReply(reply) => deliver_reply(state, reply, clock),
    }
}

fn send_message(state: &mut ConversationState, text: String, clock: &dyn Clock) -> Vec<Effect> {
    if text.trim().is_empty() {
        debug!("ignoring blank message");
        return Vec::new();
    }

    match state.selected_event_id {
        None => start_conversation(state, text, clock),
        Some(event_id) => {
            let message_id = state.next_message_id(clock);
            state.transcript.push(Message::user(message_id, text));
            debug!(event_id = %event_id, "appended user message");
            vec![
                Effect::ScheduleReply(PendingReply {
                    event_id,
                    text: replies::acknowledgement(),
                }),
                Effect::Render,
            ]
        }
    }
}

fn start_conversation(state: &mut ConversationState, text: String, clock: &dyn Clock) -> Vec<Effect> {
    let title = state.title_policy.derive(&text);
    let event_id = EventId(state.ids.next(clock.epoch_millis()));
    let message_id = state.next_message_id(clock);

    state.events.add(Event {
        id: event_id,
        title: title.clone(),
        preview: text.clone(),
        created_at: clock.now_local(),
    });
    state.replace_transcript(Some(event_id), vec![Message::user(message_id, text)]);
    info!(event_id = %event_id, title = %title, "started conversation");

    vec![
        Effect::ScheduleReply(PendingReply {
            event_id,
            text: replies::greeting(&title),
        }),
        Effect::Render,
    ]
}

fn select_conversation(state: &mut ConversationState, selection: Selection) -> Vec<Effect> {
    match selection {
        Selection::New => {
            state.replace_transcript(None, Vec::new());
            vec![Effect::Render]
        }
        Selection::Event(event_id) => {
            let Some(event) = state.events.get(event_id) else {
                warn!(event_id = %event_id, "ignoring selection of unknown conversation");
                return Vec::new();
            };
            let mut transcript = vec![
                Message::user(RESTORED_PROMPT_ID, event.preview.clone()),
                Message::assistant(RESTORED_REPLY_ID, replies::greeting(&event.title)),
            ];
            transcript.extend_from_slice(state.background_replies(event_id));
            state.replace_transcript(Some(event_id), transcript);
            vec![Effect::Render]
        }
    }
}

fn delete_conversation(state: &mut ConversationState, event_id: EventId) -> Vec<Effect> {
    if !state.events.remove(event_id) {
        debug!(event_id = %event_id, "conversation already gone");
        return Vec::new();
    }
    state.background_replies.remove(&event_id);

    if state.selected_event_id == Some(event_id) {
        state.replace_transcript(None, Vec::new());
    }
    info!(event_id = %event_id, "deleted conversation");
    vec![Effect::CancelReplies(event_id), Effect::Render]
}

fn deliver_reply(state: &mut ConversationState, reply: PendingReply, clock: &dyn Clock) -> Vec<Effect> {
    let event_id = reply.event_id;
    if !state.events.contains(event_id) {
        debug!(event_id = %event_id, "dropping reply for a deleted conversation");
        return Vec::new();
    }

    let message = Message::assistant(state.next_message_id(clock), reply.text);
    if state.selected_event_id == Some(event_id) {
        state.transcript.push(message);
        return vec![Effect::Render];
    }

    debug!(event_id = %event_id, "kept reply for a background conversation");
    state.background_replies.entry(event_id).or_default().push(message);
    Vec::new()
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
