use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{EventId, Message},
    protocol::{ConversationSnapshot, Notification},
};
use tokio::{
    sync::{broadcast, broadcast::error::RecvError, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

pub mod bus;
pub mod clock;
pub mod event_store;
pub mod profile;
pub mod replies;
pub mod search;
pub mod settings;
pub mod state;
pub mod title;

pub use bus::NotificationBus;
pub use clock::{Clock, FixedClock, SystemClock};
pub use profile::{Account, AccountDirectory};
pub use settings::{AssistantSettings, ResponseLanguage, SettingChange, Voice};
pub use state::{Action, ConversationState, Effect, PendingReply, Selection};
pub use title::TitlePolicy;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Simulated assistant latency.
    pub reply_delay: Duration,
    pub title_policy: TitlePolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            title_policy: TitlePolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    StateChanged(ConversationSnapshot),
    ReplyDelivered { event_id: EventId, message: Message },
}

/// Surface consumed by the presentation layer.
#[async_trait]
pub trait ConversationHandle: Send + Sync {
    /// Returns the conversation the message went to, or `None` for blank input.
    async fn send_message(&self, text: &str) -> Option<EventId>;
    async fn select_conversation(&self, selection: Selection);
    async fn delete_conversation(&self, event_id: EventId);
    async fn snapshot(&self) -> ConversationSnapshot;
    /// Number of simulated replies that have not fired yet.
    async fn pending_reply_count(&self) -> usize;
    fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent>;
}

/// Owns the conversation state and runs the effects its transitions request.
pub struct ConversationController {
    clock: Arc<dyn Clock>,
    reply_delay: Duration,
    state: Mutex<ConversationState>,
    pending_replies: Mutex<HashMap<EventId, HashMap<u64, JoinHandle<()>>>>,
    next_reply_key: AtomicU64,
    bus_attached: AtomicBool,
    events: broadcast::Sender<ClientEvent>,
}

impl ConversationController {
    pub fn new(config: ControllerConfig) -> Arc<Self> {
        Self::new_with_clock(config, Arc::new(SystemClock))
    }

    pub fn new_with_clock(config: ControllerConfig, clock: Arc<dyn Clock>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            clock,
            reply_delay: config.reply_delay,
            state: Mutex::new(ConversationState::new(config.title_policy)),
            pending_replies: Mutex::new(HashMap::new()),
            next_reply_key: AtomicU64::new(0),
            bus_attached: AtomicBool::new(false),
            events,
        })
    }

    /// Starts the single bus listener. Returns `None` if one is already attached.
    pub fn attach_bus(self: &Arc<Self>, bus: &NotificationBus) -> Option<JoinHandle<()>> {
        if self.bus_attached.swap(true, Ordering::SeqCst) {
            warn!("notification bus listener already attached");
            return None;
        }

        let mut notifications = bus.subscribe();
        let controller = Arc::clone(self);
        Some(tokio::spawn(async move {
            loop {
                match notifications.recv().await {
                    Ok(Notification::ClearConversation { chat_id }) => {
                        debug!(event_id = %chat_id, "clear-conversation received");
                        controller.dispatch(Action::DeleteConversation(chat_id)).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "notification listener lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("notification listener stopped");
        }))
    }

    /// Runs one transition and its effects. Returns the selected event if state changed.
    async fn dispatch(self: &Arc<Self>, action: Action) -> Option<EventId> {
        let (effects, snapshot, selected) = {
            let mut state = self.state.lock().await;
            let effects = state::reduce(&mut state, action, self.clock.as_ref());
            let snapshot = effects
                .contains(&Effect::Render)
                .then(|| state.snapshot());
            (effects, snapshot, state.selected_event_id())
        };

        for effect in effects {
            match effect {
                Effect::ScheduleReply(reply) => self.schedule_reply(reply).await,
                Effect::CancelReplies(event_id) => self.cancel_replies(event_id).await,
                Effect::Render => {}
            }
        }

        let snapshot = snapshot?;
        let _ = self.events.send(ClientEvent::StateChanged(snapshot));
        selected
    }

    async fn schedule_reply(self: &Arc<Self>, reply: PendingReply) {
        let event_id = reply.event_id;
        let key = self.next_reply_key.fetch_add(1, Ordering::Relaxed);
        let delay = self.reply_delay;
        let controller = Arc::clone(self);

        // Held across the spawn so the task cannot forget itself before it is registered.
        let mut pending = self.pending_replies.lock().await;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.deliver(reply).await;
            controller.forget_reply(event_id, key).await;
        });
        pending.entry(event_id).or_default().insert(key, handle);
    }

    async fn forget_reply(&self, event_id: EventId, key: u64) {
        let mut pending = self.pending_replies.lock().await;
        if let Some(handles) = pending.get_mut(&event_id) {
            handles.remove(&key);
            if handles.is_empty() {
                pending.remove(&event_id);
            }
        }
    }

    async fn cancel_replies(&self, event_id: EventId) {
        let Some(handles) = self.pending_replies.lock().await.remove(&event_id) else {
            return;
        };
        let mut aborted = 0usize;
        for handle in handles.into_values().filter(|handle| !handle.is_finished()) {
            handle.abort();
            aborted += 1;
        }
        if aborted > 0 {
            info!(event_id = %event_id, aborted, "cancelled pending replies");
        }
    }

    async fn deliver(&self, reply: PendingReply) {
        let event_id = reply.event_id;
        let (snapshot, message) = {
            let mut state = self.state.lock().await;
            let effects = state::reduce(&mut state, Action::DeliverReply(reply), self.clock.as_ref());
            if effects.is_empty() {
                return;
            }
            (state.snapshot(), state.transcript().last().cloned())
        };

        let _ = self.events.send(ClientEvent::StateChanged(snapshot));
        if let Some(message) = message {
            debug!(event_id = %event_id, message_id = %message.id, "delivered simulated reply");
            let _ = self.events.send(ClientEvent::ReplyDelivered { event_id, message });
        }
    }
}

#[async_trait]
impl ConversationHandle for Arc<ConversationController> {
    async fn send_message(&self, text: &str) -> Option<EventId> {
        self.dispatch(Action::SendMessage(text.to_string())).await
    }

    async fn select_conversation(&self, selection: Selection) {
        self.dispatch(Action::SelectConversation(selection)).await;
    }

    async fn delete_conversation(&self, event_id: EventId) {
        self.dispatch(Action::DeleteConversation(event_id)).await;
    }

    async fn snapshot(&self) -> ConversationSnapshot {
        self.state.lock().await.snapshot()
    }

    async fn pending_reply_count(&self) -> usize {
        let pending = self.pending_replies.lock().await;
        pending
            .values()
            .flat_map(HashMap::values)
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
