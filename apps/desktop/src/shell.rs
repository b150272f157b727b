//! Terminal presentation shell: reads commands, drives the conversation handle, prints results.

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use client_core::{
    search::filter_events, AccountDirectory, AssistantSettings, ClientEvent, ConversationHandle,
    NotificationBus, Selection,
};
use shared::{
    domain::{EventId, Message, Sender},
    locale::TextKey,
    preferences::Preferences,
};
use storage::{save_language, save_theme, PreferenceStore};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, broadcast::error::RecvError, RwLock},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    commands::{is_confirmation, parse_command, ProfileCommand, ShellCommand},
    render::Renderer,
};

const DELETE_ACK_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(Vec<String>),
    Quit,
}

pub struct Shell<H: ConversationHandle> {
    handle: H,
    bus: NotificationBus,
    store: Arc<dyn PreferenceStore>,
    preferences: Preferences,
    system_prefers_dark: bool,
    renderer: Arc<RwLock<Renderer>>,
    settings: Arc<RwLock<AssistantSettings>>,
    accounts: AccountDirectory,
    pending_delete: Option<EventId>,
}

impl<H: ConversationHandle> Shell<H> {
    pub fn new(
        handle: H,
        bus: NotificationBus,
        store: Arc<dyn PreferenceStore>,
        preferences: Preferences,
        system_prefers_dark: bool,
        colored: bool,
    ) -> Self {
        let renderer = Renderer::new(
            preferences.language,
            preferences.theme.resolve(system_prefers_dark),
            colored,
        );
        Self {
            handle,
            bus,
            store,
            preferences,
            system_prefers_dark,
            renderer: Arc::new(RwLock::new(renderer)),
            settings: Arc::new(RwLock::new(AssistantSettings::default())),
            accounts: AccountDirectory::default(),
            pending_delete: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let printer = self.spawn_reply_printer();
        print_lines(&self.renderer.read().await.landing());

        let mut input = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt();
            let Some(line) = input.next_line().await.context("failed to read input")? else {
                break;
            };
            match self.handle_line(&line).await {
                Ok(Step::Continue(output)) => print_lines(&output),
                Ok(Step::Quit) => break,
                Err(err) => {
                    error!(error = %err, "command failed");
                    println!("{err:#}");
                }
            }
        }

        printer.abort();
        let pending = self.handle.pending_reply_count().await;
        if pending > 0 {
            info!(pending, "exiting with replies still pending");
        }
        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Step> {
        let renderer = self.renderer.read().await.clone();

        if let Some(event_id) = self.pending_delete.take() {
            return self.finish_delete(event_id, line, &renderer).await;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => return Ok(Step::Continue(vec![err.to_string()])),
        };
        debug!(?command, "shell command");

        let lines = match command {
            ShellCommand::Send(text) => {
                let was_landing = self.handle.snapshot().await.is_landing();
                if self.handle.send_message(&text).await.is_none() {
                    return Ok(Step::Continue(Vec::new()));
                }
                let snapshot = self.handle.snapshot().await;
                let mut lines = Vec::new();
                if was_landing {
                    lines.push(renderer.header(&snapshot));
                }
                if let Some(sent) = snapshot
                    .transcript
                    .iter()
                    .rev()
                    .find(|message| message.sender == Sender::User)
                {
                    lines.push(renderer.message(sent));
                }
                lines
            }
            ShellCommand::New => {
                self.handle.select_conversation(Selection::New).await;
                renderer.landing()
            }
            ShellCommand::Open(event_id) => {
                self.handle
                    .select_conversation(Selection::Event(event_id))
                    .await;
                let snapshot = self.handle.snapshot().await;
                if snapshot.selected_event_id == Some(event_id) {
                    renderer.snapshot(&snapshot)
                } else {
                    vec![format!("unknown conversation {event_id}")]
                }
            }
            ShellCommand::Delete(event_id) => self.request_delete(event_id, &renderer).await,
            ShellCommand::ClearCurrent => match self.handle.snapshot().await.selected_event_id {
                Some(event_id) => self.request_delete(event_id, &renderer).await,
                None => vec!["no conversation is open".to_string()],
            },
            ShellCommand::Events(query) => {
                let snapshot = self.handle.snapshot().await;
                let matches = filter_events(&snapshot.events, query.as_deref().unwrap_or_default());
                renderer.event_list(&matches)
            }
            ShellCommand::Theme(None) => vec![renderer.theme_status(self.preferences.theme)],
            ShellCommand::Theme(Some(theme)) => {
                save_theme(self.store.as_ref(), theme).await?;
                self.preferences.theme = theme;
                let updated = renderer.with_theme(theme.resolve(self.system_prefers_dark));
                let lines = vec![updated.theme_status(theme)];
                *self.renderer.write().await = updated;
                lines
            }
            ShellCommand::Language(None) => vec![renderer.language_status()],
            ShellCommand::Language(Some(language)) => {
                save_language(self.store.as_ref(), language).await?;
                self.preferences.language = language;
                let updated = renderer.with_language(language);
                let lines = vec![updated.language_status()];
                *self.renderer.write().await = updated;
                lines
            }
            ShellCommand::Settings(None) => renderer.settings(&*self.settings.read().await),
            ShellCommand::Settings(Some(change)) => {
                let mut settings = self.settings.write().await;
                settings.apply(change);
                renderer.settings(&settings)
            }
            ShellCommand::Profile(command) => self.profile(command, &renderer),
            ShellCommand::Help => renderer.help(),
            ShellCommand::Quit => return Ok(Step::Quit),
        };

        Ok(Step::Continue(lines))
    }

    fn profile(&mut self, command: ProfileCommand, renderer: &Renderer) -> Vec<String> {
        let outcome = match command {
            ProfileCommand::Show => Ok(()),
            ProfileCommand::LogIn { email, password } => self
                .accounts
                .log_in(&email, password.expose())
                .map(|_| ()),
            ProfileCommand::Register { email, password } => self
                .accounts
                .register(&email, password.expose())
                .map(|_| ()),
            ProfileCommand::Switch(email) => self.accounts.switch_to(&email).map(|_| ()),
        };
        match outcome {
            Ok(()) => renderer.profile(&self.accounts),
            Err(err) => vec![err.to_string()],
        }
    }

    async fn request_delete(&mut self, event_id: EventId, renderer: &Renderer) -> Vec<String> {
        let snapshot = self.handle.snapshot().await;
        match snapshot.events.iter().find(|event| event.id == event_id) {
            Some(event) => {
                self.pending_delete = Some(event_id);
                renderer.confirm_delete(event)
            }
            None => vec![format!("unknown conversation {event_id}")],
        }
    }

    async fn finish_delete(
        &mut self,
        event_id: EventId,
        answer: &str,
        renderer: &Renderer,
    ) -> Result<Step> {
        if !is_confirmation(answer, renderer.language()) {
            return Ok(Step::Continue(vec![renderer.text(TextKey::No).to_string()]));
        }

        let mut updates = self.handle.subscribe_events();
        if self.bus.clear_conversation(event_id) == 0 {
            warn!(event_id = %event_id, "no clear-conversation listener, deleting directly");
            self.handle.delete_conversation(event_id).await;
        } else {
            wait_for_removal(&mut updates, event_id).await;
        }

        let snapshot = self.handle.snapshot().await;
        Ok(Step::Continue(renderer.snapshot(&snapshot)))
    }

    fn spawn_reply_printer(&self) -> JoinHandle<()> {
        let mut updates = self.handle.subscribe_events();
        let renderer = Arc::clone(&self.renderer);
        let settings = Arc::clone(&self.settings);
        tokio::spawn(async move {
            loop {
                match updates.recv().await {
                    Ok(ClientEvent::ReplyDelivered { event_id, message }) => {
                        match notification_line(&renderer, &settings, &message).await {
                            Some(line) => {
                                println!("\n{line}");
                                prompt();
                            }
                            None => debug!(event_id = %event_id, "reply notification muted"),
                        }
                    }
                    Ok(ClientEvent::StateChanged(_)) => {}
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "reply printer lagged"),
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

/// The line to print for a reply that arrived while waiting for input, unless notifications are off.
async fn notification_line(
    renderer: &RwLock<Renderer>,
    settings: &RwLock<AssistantSettings>,
    message: &Message,
) -> Option<String> {
    if !settings.read().await.notifications {
        return None;
    }
    Some(renderer.read().await.message(message))
}

async fn wait_for_removal(updates: &mut broadcast::Receiver<ClientEvent>, event_id: EventId) {
    let removed = tokio::time::timeout(DELETE_ACK_TIMEOUT, async {
        loop {
            match updates.recv().await {
                Ok(ClientEvent::StateChanged(snapshot))
                    if !snapshot.events.iter().any(|event| event.id == event_id) =>
                {
                    break;
                }
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;

    if removed.is_err() {
        warn!(event_id = %event_id, "timed out waiting for conversation removal");
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
