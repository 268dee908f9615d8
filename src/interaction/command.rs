//! Parsing of chat text into bot commands.
//!
//! A message selects a command by its leading prefix (case-sensitive). The
//! arguments are validated here, once, so that the handlers only ever see
//! well-formed values.

use crate::base::{
    replies,
    types::{NewEvent, Reply},
};

use super::format;

/// Prefix of the command that creates an event: `!criarevento Title | Description | DD/MM/YYYY`.
pub const CREATE_PREFIX: &str = "!criarevento";
/// Prefix of the command that shows one event: `!verificar <id>`.
pub const INSPECT_PREFIX: &str = "!verificar";
/// Prefix of the command that lists all events: `!lista`.
pub const LIST_PREFIX: &str = "!lista";

/// Separator between the arguments of [`CREATE_PREFIX`].
const ARGUMENT_SEPARATOR: char = '|';

/// A recognized, validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an event.
    Create(NewEvent),
    /// Show the event with the given id.
    Inspect { id: i64 },
    /// List all events, soonest first.
    List,
}

/// Why a recognized command was rejected before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// `!criarevento` with fewer than three `|`-separated parts.
    CreateUsage,
    /// `!criarevento` with a date that is not a `DD/MM/YYYY` calendar date.
    InvalidDate,
    /// `!verificar` without an integer id.
    InvalidId,
}

impl CommandError {
    /// The corrective reply shown to the user.
    pub fn reply(&self) -> Reply {
        match self {
            CommandError::CreateUsage => Reply::Channel(replies::CREATE_USAGE.to_string()),
            CommandError::InvalidDate => Reply::Channel(replies::INVALID_DATE.to_string()),
            CommandError::InvalidId => Reply::Thread(replies::INVALID_ID.to_string()),
        }
    }
}

impl Command {
    /// Parses a message text.
    ///
    /// Returns `None` when the text does not start with any command prefix, and
    /// `Some(Err(_))` when it does but the arguments are invalid.
    pub fn parse(text: &str) -> Option<Result<Self, CommandError>> {
        if let Some(rest) = text.strip_prefix(CREATE_PREFIX) {
            return Some(parse_create(rest));
        }

        if text.starts_with(INSPECT_PREFIX) {
            return Some(parse_inspect(text));
        }

        if text.starts_with(LIST_PREFIX) {
            return Some(Ok(Command::List));
        }

        None
    }
}

fn parse_create(rest: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = rest.trim().split(ARGUMENT_SEPARATOR).map(str::trim).collect();

    let [title, description, date, ..] = parts.as_slice() else {
        return Err(CommandError::CreateUsage);
    };

    let event_date = format::parse_date(date).ok_or(CommandError::InvalidDate)?;

    Ok(Command::Create(NewEvent {
        title: title.to_string(),
        description: Some(description.to_string()),
        event_date,
    }))
}

fn parse_inspect(text: &str) -> Result<Command, CommandError> {
    text.split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<i64>().ok())
        .map(|id| Command::Inspect { id })
        .ok_or(CommandError::InvalidId)
}
