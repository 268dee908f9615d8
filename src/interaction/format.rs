//! Date parsing and the rendering of event replies.

use chrono::{DateTime, NaiveDate, Utc};

use crate::base::{
    replies,
    types::{Event, Reply},
};

/// Input and display format of dates (`DD/MM/YYYY`, as in the `pt-BR` locale).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `DD/MM/YYYY` date, returning `None` unless it names a real calendar day.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();

    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });

    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Renders a calendar date for display.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders the date part of a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format_date(timestamp.date_naive())
}

pub fn event_created(id: i64) -> Reply {
    Reply::Channel(format!("Evento criado com ID: {id}"))
}

pub fn event_not_found(id: i64) -> Reply {
    Reply::Thread(format!("Nenhum evento encontrado com ID {id}"))
}

/// The detail block of one event.
pub fn event_details(event: &Event) -> Reply {
    let description = event.description.as_deref().unwrap_or(replies::NO_DESCRIPTION);

    Reply::Channel(format!(
        "📅 *Evento #{}*\n*Título:* {}\n*Descrição:* {}\n*Data:* {}\n*Criado em:* {}",
        event.id,
        event.title,
        description,
        format_date(event.event_date),
        format_timestamp(event.created_at),
    ))
}

/// One line per event under a header, in the order given.
pub fn event_list(events: &[Event]) -> Reply {
    if events.is_empty() {
        return Reply::Thread(replies::NO_EVENTS.to_string());
    }

    let lines = events
        .iter()
        .map(|event| format!("🆔 {} | *{}* - {}", event.id, event.title, format_date(event.event_date)))
        .collect::<Vec<_>>()
        .join("\n");

    Reply::Channel(format!("{}\n{}", replies::LIST_HEADER, lines))
}
