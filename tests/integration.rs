#![cfg(test)]

use std::sync::{Arc, Mutex};

use agenda_bot::{
    base::{
        replies,
        types::{Event, IncomingMessage, NewEvent, Res, Void},
    },
    interaction::message::{handle_message, process_message},
    service::{
        chat::{ChatClient, GenericChatClient},
        db::{DbClient, EventOrder, GenericDbClient},
    },
};
use async_trait::async_trait;
use mockall::mock;

// Mocks.

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        async fn start(&self) -> Void;
        async fn send_message(&self, channel_id: &str, thread_ts: &str, text: &str) -> Void;
    }
}

// Mock event store for testing.

mock! {
    pub Store {}

    #[async_trait]
    impl GenericDbClient for Store {
        async fn create_event(&self, event: &NewEvent) -> Res<Event>;
        async fn find_event(&self, id: i64) -> Res<Option<Event>>;
        async fn list_events(&self, order: &EventOrder) -> Res<Vec<Event>>;
    }
}

/// A message sent through the mock chat client: `(channel_id, thread_ts, text)`.
type Sent = Arc<Mutex<Vec<(String, String, String)>>>;

const CHANNEL_ID: &str = "C01TEST";
const MESSAGE_TS: &str = "1700000000.000100";

/// Mock chat client that records every message it is asked to send.
fn get_recording_chat() -> (ChatClient, Sent) {
    let sent: Sent = Arc::default();
    let mut mock = MockChat::new();

    mock.expect_start().returning(|| Ok(()));

    let log = sent.clone();
    mock.expect_send_message().returning(move |channel_id, thread_ts, text| {
        log.lock().unwrap().push((channel_id.to_string(), thread_ts.to_string(), text.to_string()));
        Ok(())
    });

    (ChatClient::new(Arc::new(mock)), sent)
}

/// Mock chat client that fails the test if anything is sent.
fn get_silent_chat() -> ChatClient {
    let mut mock = MockChat::new();

    mock.expect_send_message().never();

    ChatClient::new(Arc::new(mock))
}

/// Mock store that fails the test if it is touched at all.
fn get_untouched_store() -> DbClient {
    let mut mock = MockStore::new();

    mock.expect_create_event().never();
    mock.expect_find_event().never();
    mock.expect_list_events().never();

    DbClient::new(Arc::new(mock))
}

fn message(text: &str) -> IncomingMessage {
    IncomingMessage {
        channel_id: CHANNEL_ID.to_string(),
        ts: MESSAGE_TS.to_string(),
        user_id: Some("U54321".to_string()),
        text: text.to_string(),
        ..Default::default()
    }
}

/// Runs one message through the router and returns the texts sent in reply.
async fn send(text: &str, db: &DbClient, chat: &ChatClient, sent: &Sent) -> Vec<String> {
    sent.lock().unwrap().clear();
    process_message(&message(text), db, chat).await.expect("Failed to process message");
    sent.lock().unwrap().iter().map(|(_, _, text)| text.clone()).collect()
}

fn last_sent(sent: &Sent) -> (String, String, String) {
    sent.lock().unwrap().last().cloned().expect("Nothing was sent")
}

// Tests.

#[tokio::test]
async fn test_create_then_inspect_round_trip() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    let texts = send("!criarevento Reunião | Planejamento anual | 10/03/2024", &db, &chat, &sent).await;
    assert_eq!(texts, vec!["Evento criado com ID: 1".to_string()]);

    // Creation replies go to the channel, not to a thread.
    let (channel_id, thread_ts, _) = last_sent(&sent);
    assert_eq!(channel_id, CHANNEL_ID);
    assert_eq!(thread_ts, "");

    let texts = send("!verificar 1", &db, &chat, &sent).await;
    assert_eq!(texts.len(), 1);

    let details = &texts[0];
    assert!(details.starts_with("📅 *Evento #1*"));
    assert!(details.contains("*Título:* Reunião"));
    assert!(details.contains("*Descrição:* Planejamento anual"));
    assert!(details.contains("*Data:* 10/03/2024"));
    assert!(details.contains("*Criado em:* "));
}

#[tokio::test]
async fn test_create_with_empty_description_keeps_it_empty() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    send("!criarevento Almoço |  | 01/05/2024", &db, &chat, &sent).await;

    // An empty slot is stored as an empty description, not as a missing one.
    let event = db.find_event(1).await.expect("Failed to find event").expect("Event not stored");
    assert_eq!(event.description.as_deref(), Some(""));

    let texts = send("!verificar 1", &db, &chat, &sent).await;
    assert!(texts[0].contains("*Descrição:* \n*Data:* 01/05/2024"));
    assert!(!texts[0].contains(replies::NO_DESCRIPTION));
}

#[tokio::test]
async fn test_create_with_two_parts_shows_usage() {
    let db = get_untouched_store();
    let (chat, sent) = get_recording_chat();

    let texts = send("!criarevento Reunião | Planejamento", &db, &chat, &sent).await;

    assert_eq!(texts, vec![replies::CREATE_USAGE.to_string()]);
}

#[tokio::test]
async fn test_create_with_impossible_date_is_rejected() {
    let db = get_untouched_store();
    let (chat, sent) = get_recording_chat();

    let texts = send("!criarevento X | Y | 31/02/2024", &db, &chat, &sent).await;
    assert_eq!(texts, vec![replies::INVALID_DATE.to_string()]);

    let texts = send("!criarevento X | Y | 13/13/2024", &db, &chat, &sent).await;
    assert_eq!(texts, vec![replies::INVALID_DATE.to_string()]);
}

#[tokio::test]
async fn test_inspect_with_non_numeric_id_prompts_in_thread() {
    let db = get_untouched_store();
    let (chat, sent) = get_recording_chat();

    let texts = send("!verificar abc", &db, &chat, &sent).await;
    assert_eq!(texts, vec![replies::INVALID_ID.to_string()]);

    let (_, thread_ts, _) = last_sent(&sent);
    assert_eq!(thread_ts, MESSAGE_TS);
}

#[tokio::test]
async fn test_inspect_unknown_id() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    let texts = send("!verificar 99999", &db, &chat, &sent).await;

    assert_eq!(texts, vec!["Nenhum evento encontrado com ID 99999".to_string()]);
}

#[tokio::test]
async fn test_inspect_is_idempotent() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    send("!criarevento Show | Banda local | 20/08/2024", &db, &chat, &sent).await;

    let first = send("!verificar 1", &db, &chat, &sent).await;
    let second = send("!verificar 1", &db, &chat, &sent).await;
    let third = send("!verificar 1", &db, &chat, &sent).await;

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_list_empty_store() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    let texts = send("!lista", &db, &chat, &sent).await;

    assert_eq!(texts, vec![replies::NO_EVENTS.to_string()]);
}

#[tokio::test]
async fn test_list_is_sorted_by_event_date() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    send("!criarevento Natal | Ceia | 25/12/2024", &db, &chat, &sent).await;
    send("!criarevento Carnaval | Bloco | 12/02/2024", &db, &chat, &sent).await;
    send("!criarevento Junina | Quadrilha | 24/06/2024", &db, &chat, &sent).await;

    let texts = send("!lista", &db, &chat, &sent).await;

    assert_eq!(
        texts,
        vec!["📋 *Eventos cadastrados:*\n🆔 2 | *Carnaval* - 12/02/2024\n🆔 3 | *Junina* - 24/06/2024\n🆔 1 | *Natal* - 25/12/2024".to_string()]
    );
}

#[tokio::test]
async fn test_messages_from_bots_are_ignored() {
    let db = get_untouched_store();
    let chat = get_silent_chat();

    for text in ["!lista", "!verificar 1", "!verificar abc", "!criarevento A | B | 01/01/2024"] {
        let message = IncomingMessage {
            from_bot: true,
            ..message(text)
        };

        process_message(&message, &db, &chat).await.expect("Failed to process message");
    }
}

#[tokio::test]
async fn test_unrelated_messages_are_ignored() {
    let db = get_untouched_store();
    let chat = get_silent_chat();

    for text in ["bom dia", "", "lista", "criarevento A | B | 01/01/2024", "Qual é o !lista?"] {
        process_message(&message(text), &db, &chat).await.expect("Failed to process message");
    }
}

#[tokio::test]
async fn test_replies_stay_in_the_thread_of_the_command() {
    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    let message = IncomingMessage {
        thread_ts: Some("1699999999.000001".to_string()),
        ..message("!lista")
    };

    process_message(&message, &db, &chat).await.expect("Failed to process message");

    let (_, thread_ts, _) = last_sent(&sent);
    assert_eq!(thread_ts, "1699999999.000001");
}

#[tokio::test]
async fn test_create_failure_is_reported() {
    let mut store = MockStore::new();
    store.expect_create_event().times(1).returning(|_| Err(anyhow::anyhow!("connection refused")));
    let db = DbClient::new(Arc::new(store));
    let (chat, sent) = get_recording_chat();

    let texts = send("!criarevento A | B | 01/01/2024", &db, &chat, &sent).await;

    assert_eq!(texts, vec![replies::CREATE_FAILED.to_string()]);
}

#[tokio::test]
async fn test_read_failures_are_reported() {
    let mut store = MockStore::new();
    store.expect_find_event().times(1).returning(|_| Err(anyhow::anyhow!("connection refused")));
    store.expect_list_events().times(1).returning(|_| Err(anyhow::anyhow!("connection refused")));
    let db = DbClient::new(Arc::new(store));
    let (chat, sent) = get_recording_chat();

    let texts = send("!verificar 1", &db, &chat, &sent).await;
    assert_eq!(texts, vec![replies::LOOKUP_FAILED.to_string()]);

    let texts = send("!lista", &db, &chat, &sent).await;
    assert_eq!(texts, vec![replies::LIST_FAILED.to_string()]);
}

#[tokio::test]
async fn test_create_passes_parsed_arguments_to_store() {
    let mut store = MockStore::new();
    store
        .expect_create_event()
        .withf(|event| event.title == "Festa" && event.description.as_deref() == Some("Aniversário") && event.event_date.to_string() == "2024-11-30")
        .times(1)
        .returning(|event| {
            Ok(Event {
                id: 7,
                title: event.title.clone(),
                description: event.description.clone(),
                event_date: event.event_date,
                created_at: chrono::Utc::now(),
            })
        });
    let db = DbClient::new(Arc::new(store));
    let (chat, sent) = get_recording_chat();

    let texts = send("!criarevento   Festa|Aniversário   |30/11/2024  ", &db, &chat, &sent).await;

    assert_eq!(texts, vec!["Evento criado com ID: 7".to_string()]);
}

#[tokio::test]
async fn test_list_requests_ascending_event_date() {
    let mut store = MockStore::new();
    store
        .expect_list_events()
        .withf(|order| *order == EventOrder::by_event_date())
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let db = DbClient::new(Arc::new(store));
    let (chat, sent) = get_recording_chat();

    let texts = send("!lista", &db, &chat, &sent).await;

    assert_eq!(texts, vec![replies::NO_EVENTS.to_string()]);
}

#[tokio::test]
async fn test_handle_message_replies_in_background() {
    use std::time::Duration;

    let db = DbClient::surreal_memory().await.expect("Failed to create DB client");
    let (chat, sent) = get_recording_chat();

    handle_message(message("!lista"), db, chat);

    // Poll until the spawned handler has replied.
    for _ in 0..50 {
        if !sent.lock().unwrap().is_empty() {
            break;
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let (_, _, text) = last_sent(&sent);
    assert_eq!(text, replies::NO_EVENTS);
}
