use super::*;
use shared::domain::Sender;

const DELAY: Duration = Duration::from_millis(1000);

fn controller() -> Arc<ConversationController> {
    ConversationController::new(ControllerConfig {
        reply_delay: DELAY,
        title_policy: TitlePolicy::default(),
    })
}

/// Lets every reply scheduled so far fire (time is paused in these tests).
async fn settle() {
    tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
}

fn senders(snapshot: &ConversationSnapshot) -> Vec<Sender> {
    snapshot
        .transcript
        .iter()
        .map(|message| message.sender)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn first_message_is_answered_after_the_delay() {
    let controller = controller();

    let event_id = controller
        .send_message("Can you make a report")
        .await
        .expect("event created");

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.events.len(), 1);
    assert_eq!(snapshot.selected_event_id, Some(event_id));
    assert_eq!(senders(&snapshot), vec![Sender::User]);

    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(controller.snapshot().await.transcript.len(), 1);

    settle().await;
    let snapshot = controller.snapshot().await;
    assert_eq!(senders(&snapshot), vec![Sender::User, Sender::Assistant]);
    assert_eq!(
        snapshot.transcript[1].text,
        "I'll help you with \"Make a report\". What specific information do you need?"
    );
}

#[tokio::test(start_paused = true)]
async fn blank_input_creates_nothing() {
    let controller = controller();

    assert_eq!(controller.send_message("").await, None);
    assert_eq!(controller.send_message("   ").await, None);

    settle().await;
    let snapshot = controller.snapshot().await;
    assert!(snapshot.events.is_empty());
    assert!(snapshot.transcript.is_empty());
    assert_eq!(controller.pending_reply_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_sends_each_get_their_own_reply() {
    let controller = controller();
    controller.send_message("hello").await.expect("event");
    controller.send_message("second").await;
    controller.send_message("third").await;
    assert_eq!(controller.pending_reply_count().await, 3);

    settle().await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.events.len(), 1);
    assert_eq!(
        senders(&snapshot),
        vec![
            Sender::User,
            Sender::User,
            Sender::User,
            Sender::Assistant,
            Sender::Assistant,
            Sender::Assistant,
        ]
    );
    assert_eq!(controller.pending_reply_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn reply_never_lands_in_another_conversation() {
    let controller = controller();
    let first = controller.send_message("first topic").await.expect("first");
    controller.select_conversation(Selection::New).await;
    let second = controller.send_message("second topic").await.expect("second");
    assert_ne!(first, second);

    settle().await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.selected_event_id, Some(second));
    assert_eq!(snapshot.transcript.len(), 2);
    assert_eq!(snapshot.transcript[1].text, replies::greeting("Second topic"));
}

#[tokio::test(start_paused = true)]
async fn deleting_a_conversation_cancels_its_replies() {
    let controller = controller();
    let event_id = controller.send_message("hello").await.expect("event");
    assert_eq!(controller.pending_reply_count().await, 1);

    controller.delete_conversation(event_id).await;
    assert_eq!(controller.pending_reply_count().await, 0);

    settle().await;
    let snapshot = controller.snapshot().await;
    assert!(snapshot.is_landing());
    assert!(snapshot.events.is_empty());
    assert!(snapshot.transcript.is_empty());
}

#[tokio::test(start_paused = true)]
async fn deleting_a_background_conversation_keeps_the_current_one() {
    let controller = controller();
    let first = controller.send_message("first").await.expect("first");
    controller.select_conversation(Selection::New).await;
    let second = controller.send_message("second").await.expect("second");

    controller.delete_conversation(first).await;
    controller.delete_conversation(first).await;

    settle().await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.selected_event_id, Some(second));
    assert_eq!(snapshot.events.len(), 1);
    assert_eq!(senders(&snapshot), vec![Sender::User, Sender::Assistant]);
}

#[tokio::test(start_paused = true)]
async fn selecting_an_event_restores_its_opening_exchange() {
    let controller = controller();
    let first = controller.send_message("please plan my trip").await.expect("first");
    settle().await;
    controller.send_message("and book hotels").await;
    settle().await;
    controller.select_conversation(Selection::New).await;

    controller.select_conversation(Selection::Event(first)).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.selected_event_id, Some(first));
    assert_eq!(snapshot.transcript.len(), 2);
    assert_eq!(snapshot.transcript[0].text, "please plan my trip");
    assert_eq!(snapshot.transcript[1].text, replies::greeting("Plan my trip"));
}

#[tokio::test(start_paused = true)]
async fn clear_conversation_notification_deletes_through_the_bus() {
    let controller = controller();
    let bus = NotificationBus::new();
    let listener = controller.attach_bus(&bus).expect("first listener");
    assert!(controller.attach_bus(&bus).is_none());

    let event_id = controller.send_message("hello").await.expect("event");
    let mut updates = controller.subscribe_events();
    assert_eq!(bus.clear_conversation(event_id), 1);

    let snapshot = loop {
        match updates.recv().await.expect("update") {
            ClientEvent::StateChanged(snapshot) => break snapshot,
            ClientEvent::ReplyDelivered { .. } => continue,
        }
    };
    assert!(snapshot.is_landing());
    assert!(snapshot.events.is_empty());

    settle().await;
    assert!(controller.snapshot().await.transcript.is_empty());
    listener.abort();
}

#[tokio::test(start_paused = true)]
async fn delivered_replies_are_announced() {
    let controller = controller();
    let mut updates = controller.subscribe_events();
    let event_id = controller.send_message("hello").await.expect("event");

    settle().await;

    let mut delivered = Vec::new();
    while let Ok(update) = updates.try_recv() {
        if let ClientEvent::ReplyDelivered { event_id, message } = update {
            delivered.push((event_id, message));
        }
    }
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, event_id);
    assert_eq!(delivered[0].1.sender, Sender::Assistant);
}

#[tokio::test(start_paused = true)]
async fn reply_follows_its_conversation_when_reopened() {
    let controller = controller();
    let trip = controller.send_message("find flights").await.expect("trip");
    settle().await;
    controller.send_message("and hotels").await;
    controller.select_conversation(Selection::New).await;
    controller.send_message("weather").await.expect("weather");
    controller.select_conversation(Selection::Event(trip)).await;

    settle().await;
    let snapshot = controller.snapshot().await;
    let texts: Vec<_> = snapshot.transcript.iter().map(|m| m.text.clone()).collect();
    assert_eq!(
        texts,
        vec![
            "find flights".to_string(),
            replies::greeting("Flights"),
            replies::acknowledgement(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn background_reply_is_shown_when_its_conversation_opens() {
    let controller = controller();
    let first = controller.send_message("first topic").await.expect("first");
    controller.select_conversation(Selection::New).await;
    controller.send_message("second topic").await.expect("second");

    settle().await;
    controller.select_conversation(Selection::Event(first)).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(
        senders(&snapshot),
        vec![Sender::User, Sender::Assistant, Sender::Assistant]
    );
}

#[tokio::test(start_paused = true)]
async fn finished_replies_leave_no_bookkeeping_behind() {
    let controller = controller();
    controller.send_message("first").await.expect("first");
    controller.select_conversation(Selection::New).await;
    controller.send_message("second").await.expect("second");
    assert_eq!(controller.pending_replies.lock().await.len(), 2);

    settle().await;

    assert!(controller.pending_replies.lock().await.is_empty());
    assert_eq!(controller.pending_reply_count().await, 0);
}
