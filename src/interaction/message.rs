//! Routes chat messages to bot commands.

use tracing::{Instrument, debug, error, info, instrument, warn};

use crate::{
    base::{
        replies,
        types::{IncomingMessage, Reply, Void},
    },
    service::{
        chat::ChatClient,
        db::{DbClient, EventOrder},
    },
};

use super::{
    command::Command,
    format,
};

/// Handles an incoming chat message.
///
/// Spawns a new task so the chat listener is never blocked by the store.
#[instrument(skip_all)]
pub fn handle_message(message: IncomingMessage, db: DbClient, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the message.
        let result = process_message(&message, &db, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

/// Runs the command in `message`, if any, and sends its reply.
///
/// Messages from automated accounts and messages without a command prefix are ignored.
#[instrument(skip_all, fields(channel_id = %message.channel_id, ts = %message.ts, user_id = message.user_id.as_deref().unwrap_or_default()))]
pub async fn process_message(message: &IncomingMessage, db: &DbClient, chat: &ChatClient) -> Void {
    if message.from_bot {
        debug!("Skipping message from an automated account.");
        return Ok(());
    }

    let Some(command) = Command::parse(&message.text) else {
        return Ok(());
    };

    let reply = match command {
        Ok(command) => execute(command, db).await,
        Err(err) => {
            warn!("Rejected command: {:?}", err);
            err.reply()
        }
    };

    send_reply(message, &reply, chat).await
}

/// Runs a validated command against the store.
///
/// Store failures are logged and turned into a generic reply.
pub async fn execute(command: Command, db: &DbClient) -> Reply {
    match command {
        Command::Create(event) => {
            info!("Creating event `{}` ...", event.title);

            match db.create_event(&event).await {
                Ok(created) => format::event_created(created.id),
                Err(err) => {
                    error!("Failed to create event: {:?}", err);
                    Reply::Channel(replies::CREATE_FAILED.to_string())
                }
            }
        }
        Command::Inspect { id } => {
            info!("Looking up event `{}` ...", id);

            match db.find_event(id).await {
                Ok(Some(event)) => format::event_details(&event),
                Ok(None) => format::event_not_found(id),
                Err(err) => {
                    error!("Failed to look up event `{}`: {:?}", id, err);
                    Reply::Thread(replies::LOOKUP_FAILED.to_string())
                }
            }
        }
        Command::List => {
            info!("Listing events ...");

            match db.list_events(&EventOrder::by_event_date()).await {
                Ok(events) => format::event_list(&events),
                Err(err) => {
                    error!("Failed to list events: {:?}", err);
                    Reply::Thread(replies::LIST_FAILED.to_string())
                }
            }
        }
    }
}

/// Sends a reply next to, or in the thread of, the triggering message.
async fn send_reply(message: &IncomingMessage, reply: &Reply, chat: &ChatClient) -> Void {
    let thread_ts = match reply {
        Reply::Channel(_) => message.thread_ts.as_deref().unwrap_or_default(),
        Reply::Thread(_) => message.thread_ts.as_deref().unwrap_or(&message.ts),
    };

    chat.send_message(&message.channel_id, thread_ts, reply.text()).await
}

