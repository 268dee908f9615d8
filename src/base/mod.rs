//! Core components, types, and utilities for the agenda-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - User-facing reply texts.
//! - Common types and result handling.

pub mod config;
pub mod replies;
pub mod types;
