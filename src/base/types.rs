use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// An event as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: i64,
    pub title: String,
    /// `None` when the creator left the description slot empty.
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// The fields a user supplies when creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
}

/// A chat message, stripped down to what the command router needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncomingMessage {
    pub channel_id: String,
    /// Timestamp of the message; replies that target the message are threaded on it.
    pub ts: String,
    /// Timestamp of the thread the message was posted in, if any.
    pub thread_ts: Option<String>,
    pub user_id: Option<String>,
    pub text: String,
    /// Set when the author is this bot or any other automated account.
    pub from_bot: bool,
}

/// Where a reply lands relative to the message that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A top-level message in the same channel.
    Channel(String),
    /// A reply in the thread of the triggering message.
    Thread(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Channel(text) | Reply::Thread(text) => text,
        }
    }
}
