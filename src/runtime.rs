//! Runtime services and shared state for the agenda-bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{chat::ChatClient, db::DbClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the database client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The database client instance.
    pub db: DbClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the database.
        let db = DbClient::surreal(&config).await?;

        // Initialize the chat client.
        let chat = ChatClient::slack(&config, db.clone()).await?;

        Ok(Self { config, db, chat })
    }

    /// Listen for messages until shutdown.
    pub async fn start(&self) -> Void {
        self.chat.start().await
    }
}
