//! Message handling and user interactions for agenda-bot.
//!
//! This module provides functionality for handling chat messages:
//! - Parsing message text into commands
//! - Running commands against the event store
//! - Rendering dates and replies

pub mod command;
pub mod format;
pub mod message;
