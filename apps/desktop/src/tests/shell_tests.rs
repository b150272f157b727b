use super::*;

use std::{collections::HashMap, sync::Mutex as StdMutex};

use async_trait::async_trait;
use client_core::{ControllerConfig, ConversationController};
use shared::{
    domain::MessageId,
    preferences::{Language, ThemePreference, LANGUAGE_KEY, THEME_KEY},
};

#[derive(Default)]
struct MemoryStore {
    values: StdMutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn value(&self, key: &str) -> Option<String> {
        self.values.lock().expect("store lock").get(key).cloned()
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct Harness {
    shell: Shell<Arc<ConversationController>>,
    controller: Arc<ConversationController>,
    store: Arc<MemoryStore>,
}

fn harness(attach_bus: bool) -> Harness {
    let controller = ConversationController::new(ControllerConfig {
        reply_delay: Duration::from_millis(100),
        ..ControllerConfig::default()
    });
    let bus = NotificationBus::new();
    if attach_bus {
        controller.attach_bus(&bus).expect("first listener");
    }
    let store = Arc::new(MemoryStore::default());
    let shell = Shell::new(
        Arc::clone(&controller),
        bus,
        store.clone(),
        Preferences::default(),
        false,
        false,
    );
    Harness {
        shell,
        controller,
        store,
    }
}

async fn run(shell: &mut Shell<Arc<ConversationController>>, line: &str) -> Vec<String> {
    match shell.handle_line(line).await.expect("command") {
        Step::Continue(lines) => lines,
        Step::Quit => panic!("unexpected quit on {line:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn first_message_prints_header_and_reply_arrives_later() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(true);

    let lines = run(&mut shell, "Can you make a report").await;
    assert_eq!(
        lines,
        vec![
            "== Make a report ==".to_string(),
            "You (Just now): Can you make a report".to_string(),
        ]
    );
    assert_eq!(controller.snapshot().await.transcript.len(), 1);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(controller.snapshot().await.transcript.len(), 2);

    let follow_up = run(&mut shell, "and add charts").await;
    assert_eq!(follow_up, vec!["You (Just now): and add charts".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn blank_input_prints_nothing() {
    let Harness { mut shell, controller, .. } = harness(true);

    assert!(run(&mut shell, "   ").await.is_empty());
    assert!(controller.snapshot().await.is_landing());
}

#[tokio::test(start_paused = true)]
async fn confirmed_delete_goes_through_the_bus() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(true);
    run(&mut shell, "find a hotel").await;
    let event_id = controller.snapshot().await.events[0].id;

    let prompt = run(&mut shell, &format!("/delete {event_id}")).await;
    assert_eq!(prompt[0], "Confirm deletion: A hotel");

    let lines = run(&mut shell, "yes").await;
    assert_eq!(lines, vec!["NOIR".to_string(), "Ask me anything...".to_string()]);

    let snapshot = controller.snapshot().await;
    assert!(snapshot.events.is_empty());
    assert!(snapshot.is_landing());
    assert_eq!(controller.pending_reply_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn declined_delete_keeps_the_conversation() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(true);
    run(&mut shell, "weather tomorrow").await;

    run(&mut shell, "/clear").await;
    assert_eq!(run(&mut shell, "nope").await, vec!["No".to_string()]);
    assert_eq!(controller.snapshot().await.events.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn delete_without_bus_listener_still_removes() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(false);
    run(&mut shell, "weather tomorrow").await;
    let event_id = controller.snapshot().await.events[0].id;

    run(&mut shell, &format!("/delete {event_id}")).await;
    run(&mut shell, "y").await;

    assert!(controller.snapshot().await.events.is_empty());
}

#[tokio::test(start_paused = true)]
async fn clear_and_open_report_missing_conversations() {
    let Harness { mut shell, .. } = harness(true);

    assert_eq!(
        run(&mut shell, "/clear").await,
        vec!["no conversation is open".to_string()]
    );
    assert_eq!(
        run(&mut shell, "/open 42").await,
        vec!["unknown conversation 42".to_string()]
    );
    assert_eq!(
        run(&mut shell, "/delete 42").await,
        vec!["unknown conversation 42".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn open_renders_the_restored_transcript() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(true);
    run(&mut shell, "please book a table").await;
    let event_id = controller.snapshot().await.events[0].id;
    run(&mut shell, "/new").await;

    let lines = run(&mut shell, &format!("/open {event_id}")).await;
    assert_eq!(lines[0], "== Book a table ==");
    assert_eq!(lines.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn events_lists_and_filters() {
    let Harness { mut shell, .. } = harness(true);
    run(&mut shell, "flight to rome").await;
    run(&mut shell, "/new").await;
    run(&mut shell, "dinner plans").await;

    let all = run(&mut shell, "/events").await;
    assert_eq!(all.len(), 3);

    let filtered = run(&mut shell, "/events ROME").await;
    assert_eq!(filtered.len(), 2);
    assert!(filtered[1].contains("Flight to rome"), "{filtered:?}");

    let none = run(&mut shell, "/search zzz").await;
    assert_eq!(none, vec!["Events:".to_string(), "  No events found".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn preference_commands_persist_and_rerender() {
    let Harness {
        mut shell, store, ..
    } = harness(true);

    assert_eq!(
        run(&mut shell, "/theme dark").await,
        vec!["Theme: Dark (Dark)".to_string()]
    );
    assert_eq!(store.value(THEME_KEY).as_deref(), Some(ThemePreference::Dark.code()));

    run(&mut shell, "/lang ru").await;
    assert_eq!(store.value(LANGUAGE_KEY).as_deref(), Some(Language::Ru.code()));
    assert_eq!(
        run(&mut shell, "/events").await[0],
        "События:".to_string()
    );
    assert_eq!(run(&mut shell, "/theme").await, vec!["Тема: Темная (Темная)".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn parse_errors_are_printed_and_quit_stops() {
    let Harness { mut shell, .. } = harness(true);

    assert_eq!(
        run(&mut shell, "/teleport").await,
        vec!["unknown command '/teleport' (try /help)".to_string()]
    );
    assert_eq!(shell.handle_line("/quit").await.expect("quit"), Step::Quit);
}

#[tokio::test(start_paused = true)]
async fn settings_are_shown_and_changed_in_memory() {
    let Harness { mut shell, store, .. } = harness(true);

    let lines = run(&mut shell, "/settings").await;
    assert_eq!(lines[1], "  Enable notifications: On");

    let lines = run(&mut shell, "/settings voice australian").await;
    assert_eq!(lines[6], "  Voice: Australian Female");
    assert_eq!(
        run(&mut shell, "/settings volume 3").await,
        vec![
            "unknown setting 'volume' (expected notifications, history, suggest, voice-response, voice or response-language)"
                .to_string()
        ]
    );
    assert!(store.values.lock().expect("store lock").is_empty());
}

#[tokio::test(start_paused = true)]
async fn muted_notifications_suppress_reply_lines() {
    let Harness { mut shell, .. } = harness(true);
    let reply = Message::assistant(MessageId(7), "Sure.");

    assert_eq!(
        notification_line(&shell.renderer, &shell.settings, &reply).await,
        Some("NOIR (Just now): Sure.".to_string())
    );

    run(&mut shell, "/settings notifications off").await;
    assert_eq!(
        notification_line(&shell.renderer, &shell.settings, &reply).await,
        None
    );
}

#[tokio::test(start_paused = true)]
async fn profile_logs_in_and_switches_accounts() {
    let Harness { mut shell, .. } = harness(true);

    assert_eq!(run(&mut shell, "/profile").await[2], "  No accounts yet");
    run(&mut shell, "/profile register ana@example.com pw").await;
    let lines = run(&mut shell, "/profile login ion@example.com pw").await;
    assert_eq!(
        lines[2..],
        ["    ana@example.com".to_string(), "  * ion@example.com".to_string()]
    );

    let lines = run(&mut shell, "/profile switch ana@example.com").await;
    assert_eq!(lines[2], "  * ana@example.com");
    assert_eq!(
        run(&mut shell, "/profile register ana@example.com pw").await,
        vec!["account 'ana@example.com' is already registered".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn help_is_localized() {
    let Harness { mut shell, .. } = harness(true);

    run(&mut shell, "/lang ro").await;
    let lines = run(&mut shell, "/help").await;
    assert!(lines[0].ends_with("trimite un mesaj"), "{lines:?}");
    assert!(lines.last().is_some_and(|line| line.ends_with("ieșire")));
}

#[tokio::test(start_paused = true)]
async fn reply_for_a_reopened_conversation_is_kept() {
    let Harness {
        mut shell,
        controller,
        ..
    } = harness(true);
    run(&mut shell, "find flights").await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    let trip = controller.snapshot().await.events[0].id;
    run(&mut shell, "and hotels").await;
    run(&mut shell, "/new").await;
    run(&mut shell, "weather").await;
    run(&mut shell, &format!("/open {trip}")).await;

    tokio::time::sleep(Duration::from_millis(150)).await;
    let transcript = controller.snapshot().await.transcript;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].text, client_core::replies::acknowledgement());
}
