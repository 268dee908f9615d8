//! Library root for `agenda-bot`.
//!
//! Agenda-bot is a Slack bot that keeps a shared list of events:
//! - `!criarevento Title | Description | DD/MM/YYYY` creates an event
//! - `!verificar <id>` shows one event
//! - `!lista` lists every event, soonest first
//!
//! The bot integrates with Slack for chat and SurrealDB for storage.
//! Both sit behind traits, so the command router can run against test doubles.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use anyhow::anyhow;
use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the agenda-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with database and chat clients
/// - Starts listening for messages
pub async fn start(config: Config) -> Void {
    info!("Starting agenda-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install the default crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    info!("Agenda-bot stopped.");

    Ok(())
}
