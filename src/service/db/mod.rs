//! Event storage.
//!
//! The router only ever talks to the [`GenericDbClient`] trait through a
//! [`DbClient`] handle, so it can run against SurrealDB or a test double.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Event, NewEvent, Res};

pub mod surreal;

// Types.

/// Field an event listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Id,
    EventDate,
    CreatedAt,
}

/// Sort direction of an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering of an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOrder {
    pub field: EventField,
    pub direction: SortDirection,
}

impl EventOrder {
    /// Soonest event first.
    pub fn by_event_date() -> Self {
        Self {
            field: EventField::EventDate,
            direction: SortDirection::Ascending,
        }
    }
}

impl Default for EventOrder {
    fn default() -> Self {
        Self::by_event_date()
    }
}

// Traits.

/// Generic database client trait that clients must implement.
///
/// Events are only ever created and read: there is no update or delete.
#[async_trait]
pub trait GenericDbClient: Send + Sync + 'static {
    /// Persists a new event and returns it with its assigned id and creation time.
    async fn create_event(&self, event: &NewEvent) -> Res<Event>;

    /// Gets an event by its id, or `None` if no such event exists.
    async fn find_event(&self, id: i64) -> Res<Option<Event>>;

    /// Gets every event in the given order.
    async fn list_events(&self, order: &EventOrder) -> Res<Vec<Event>>;
}

// Structs.

/// Database client for agenda-bot.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct DbClient {
    inner: Arc<dyn GenericDbClient>,
}

impl Deref for DbClient {
    type Target = dyn GenericDbClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl DbClient {
    pub fn new(inner: Arc<dyn GenericDbClient>) -> Self {
        Self { inner }
    }
}
