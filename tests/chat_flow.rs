use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use dify_chat_tui::error::{ChatError, Result};
use dify_chat_tui::modules::chat::database::{MessageStore, NewMessage, SqliteStore};
use dify_chat_tui::modules::chat::{ChatHandler, ChatService, ChatTask};
use dify_chat_tui::util::database::Database;
use dify_chat_tui::util::dify::{ChatBackend, ChatReply};

/// Backend that records every call and answers with a fixed conversation id.
#[derive(Default)]
struct RecordingBackend {
    calls: AtomicUsize,
    seen_conversation_ids: Mutex<Vec<Option<String>>>,
    fail: bool,
}

impl RecordingBackend {
    fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for RecordingBackend {
    async fn send_message(&self, query: &str, _user: &str, conversation_id: Option<&str>) -> Result<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_conversation_ids
            .lock()
            .unwrap()
            .push(conversation_id.map(str::to_string));

        if self.fail {
            return Err(ChatError::Api { status: 500, message: "Internal Server Error".into() });
        }

        Ok(ChatReply {
            answer: format!("echo: {}", query),
            conversation_id: "conv-1".to_string(),
            metadata: None,
        })
    }
}

fn setup(backend: Arc<RecordingBackend>, database: Database) -> (ChatHandler, ChatService) {
    let service = ChatService::new(backend, database, "user-1".to_string());
    let handler = ChatHandler::new("user-1".to_string(), service.persistence_enabled());
    (handler, service)
}

/// Run a task and every follow-up it produces, the way the app loop does.
async fn drive(handler: &mut ChatHandler, service: &ChatService, task: ChatTask) {
    let mut pending = vec![task];
    while let Some(task) = pending.pop() {
        let outcome = service.run(task).await;
        pending.extend(handler.apply(outcome));
    }
}

#[tokio::test]
async fn blank_messages_never_reach_the_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, _service) = setup(backend.clone(), Database::disabled());

    assert!(handler.submit("").is_none());
    assert!(handler.submit("   \t\n ").is_none());

    assert_eq!(backend.calls(), 0);
    assert!(handler.state().messages.is_empty());
}

#[tokio::test]
async fn send_completes_without_persistence() {
    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, service) = setup(backend.clone(), Database::disabled());

    let task = handler.submit("hello").unwrap();
    drive(&mut handler, &service, task).await;

    let messages = &handler.state().messages;
    assert_eq!(messages.len(), 2);
    assert!(!messages[0].is_bot);
    assert_eq!(messages[0].content, "hello");
    assert!(messages[1].is_bot);
    assert_eq!(messages[1].content, "echo: hello");
    assert!(!messages[0].id.is_empty());
    assert_ne!(messages[0].id, messages[1].id);
    assert!(!handler.state().sending);
}

#[tokio::test]
async fn conversation_id_is_tracked_and_reused() {
    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, service) = setup(backend.clone(), Database::disabled());

    let first = handler.submit("first").unwrap();
    drive(&mut handler, &service, first).await;
    assert_eq!(handler.state().conversation_id.as_deref(), Some("conv-1"));

    let second = handler.submit("second").unwrap();
    drive(&mut handler, &service, second).await;

    let seen = backend.seen_conversation_ids.lock().unwrap().clone();
    assert_eq!(seen, vec![None, Some("conv-1".to_string())]);
}

#[tokio::test]
async fn backend_failure_is_shown_as_a_bot_message() {
    let backend = Arc::new(RecordingBackend::failing());
    let (mut handler, service) = setup(backend.clone(), Database::disabled());

    let task = handler.submit("are you there?").unwrap();
    drive(&mut handler, &service, task).await;

    let reply = handler.state().messages.last().unwrap();
    assert!(reply.is_bot);
    assert!(reply.content.contains("Internal Server Error"));
    assert!(handler.state().conversation_id.is_none());
    assert!(!handler.state().sending);

    // The UI stays usable after a failure
    assert!(handler.submit("retry").is_some());
}

#[tokio::test]
async fn search_returns_matching_subset_and_clear_restores() {
    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, service) = setup(backend, Database::disabled());

    for text in ["Budget review", "lunch plans", "BUDGET approved"] {
        let task = handler.submit(text).unwrap();
        drive(&mut handler, &service, task).await;
    }

    let mut state = handler.state().clone();
    state.set_search("budget");
    let visible: Vec<String> = state.visible_messages().iter().map(|m| m.content.clone()).collect();
    let expected: Vec<String> = state
        .messages
        .iter()
        .filter(|m| m.content.to_lowercase().contains("budget"))
        .map(|m| m.content.clone())
        .collect();
    assert_eq!(visible, expected);
    assert_eq!(visible.len(), 4);

    state.clear_search();
    assert_eq!(state.visible_messages().len(), state.messages.len());
}

#[tokio::test]
async fn persisted_exchange_shows_up_in_conversation_list() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, service) = setup(backend, Database::with_store(store.clone()));

    let task = handler.submit("remember this").unwrap();
    drive(&mut handler, &service, task).await;

    let conversations = &handler.state().conversations;
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].conversation_id, "conv-1");
    assert_eq!(conversations[0].last_message_snippet, "echo: remember this");
}

#[tokio::test]
async fn selecting_a_conversation_shows_exactly_its_messages_in_order() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let base = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    // Inserted out of order, across two conversations and two users
    let rows = [
        ("conv-b", "user-1", "b: third", 30),
        ("conv-a", "user-1", "a: only", 5),
        ("conv-b", "user-1", "b: first", 10),
        ("conv-b", "user-2", "someone else", 15),
        ("conv-b", "user-1", "b: second", 20),
    ];
    for (conversation, user, content, secs) in rows {
        store
            .insert(NewMessage {
                content: content.to_string(),
                is_bot: false,
                created_at: base + Duration::seconds(secs),
                conversation_id: Some(conversation.to_string()),
                user_id: Some(user.to_string()),
            })
            .await
            .unwrap();
    }

    let backend = Arc::new(RecordingBackend::default());
    let (mut handler, service) = setup(backend, Database::with_store(store));

    let task = handler.submit("current chat").unwrap();
    drive(&mut handler, &service, task).await;

    let task = handler.select_conversation("conv-b".to_string()).unwrap();
    drive(&mut handler, &service, task).await;

    let contents: Vec<&str> = handler.state().messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["b: first", "b: second", "b: third"]);
    assert_eq!(handler.state().conversation_id.as_deref(), Some("conv-b"));
}
