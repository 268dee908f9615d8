//! SurrealDB implementation for agenda-bot event storage.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{Event, NewEvent, Res, Void},
};

use super::{DbClient, EventField, EventOrder, GenericDbClient, SortDirection};

// Constants.

/// Schema for the event table and the id counter.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS event SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS title ON event TYPE string;
    DEFINE FIELD IF NOT EXISTS description ON event TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS event_date ON event TYPE datetime;
    DEFINE FIELD IF NOT EXISTS created_at ON event TYPE datetime DEFAULT time::now() READONLY;

    DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;
"#;

/// Projection that flattens an `event` record into an [`EventRow`].
///
/// Datetimes are cast to RFC 3339 strings so they deserialize straight into `chrono`.
const EVENT_PROJECTION: &str = "record::id(id) AS event_id, title, description, <string> event_date AS event_date, <string> created_at AS created_at";

// Extra methods on `DbClient` applied by the surreal implementation.

impl DbClient {
    /// Creates a SurrealDB client from the configured endpoint.
    pub async fn surreal(config: &Config) -> Res<Self> {
        let client = SurrealDbClient::new(config).await?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Creates a SurrealDB client backed by an in-memory database.
    pub async fn surreal_memory() -> Res<Self> {
        let client = SurrealDbClient::memory().await?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Structs.

/// An `event` row as returned by [`EVENT_PROJECTION`].
#[derive(Debug, Deserialize)]
struct EventRow {
    event_id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    event_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.event_id,
            title: row.title,
            description: row.description,
            event_date: row.event_date.date_naive(),
            created_at: row.created_at,
        }
    }
}

/// SurrealDB client implementation.
#[derive(Clone)]
pub struct SurrealDbClient {
    db: Surreal<Any>,
}

impl SurrealDbClient {
    /// Connect to the configured endpoint, sign in if credentials are set, and define the schema.
    #[instrument(name = "SurrealDbClient::new", skip_all, fields(endpoint = %config.db_endpoint))]
    pub async fn new(config: &Config) -> Res<Self> {
        let db = any::connect(config.db_endpoint.clone()).await?;

        if !config.db_username.is_empty() {
            db.signin(Root {
                username: &config.db_username,
                password: &config.db_password,
            })
            .await?;
        }

        db.use_ns(config.db_namespace.as_str()).use_db(config.db_database.as_str()).await?;

        let client = Self { db };
        client.define_schema().await?;

        info!("Database initialized successfully.");

        Ok(client)
    }

    /// Create an in-memory database, mostly useful for tests and local runs.
    #[instrument(name = "SurrealDbClient::memory")]
    pub async fn memory() -> Res<Self> {
        let db = any::connect("mem://").await?;
        db.use_ns("agenda").use_db("bot").await?;

        let client = Self { db };
        client.define_schema().await?;

        Ok(client)
    }

    async fn define_schema(&self) -> Void {
        self.db.query(SCHEMA).await?.check()?;
        Ok(())
    }

    /// Allocates the next event id from the `counter:event` record.
    async fn next_event_id(&self) -> Res<i64> {
        let mut response = self
            .db
            .query("UPSERT ONLY counter:event SET value = (value OR 0) + 1 RETURN VALUE value")
            .await?
            .check()?;

        let id: Option<i64> = response.take(0)?;

        id.ok_or_else(|| anyhow!("Failed to allocate an event id."))
    }
}

#[async_trait]
impl GenericDbClient for SurrealDbClient {
    #[instrument(skip(self))]
    async fn create_event(&self, event: &NewEvent) -> Res<Event> {
        let id = self.next_event_id().await?;
        let event_date = event.event_date.and_time(NaiveTime::MIN).and_utc().to_rfc3339();

        let mut response = self
            .db
            .query(format!(
                "CREATE type::thing('event', $id) SET title = $title, description = $description, event_date = <datetime> $event_date RETURN {EVENT_PROJECTION}"
            ))
            .bind(("id", id))
            .bind(("title", event.title.clone()))
            .bind(("description", event.description.clone()))
            .bind(("event_date", event_date))
            .await?
            .check()?;

        let rows: Vec<EventRow> = response.take(0)?;
        let created = rows.into_iter().next().map(Event::from).ok_or_else(|| anyhow!("Creating event `{}` returned no row.", id))?;

        debug!("Event `{}` created.", id);

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_event(&self, id: i64) -> Res<Option<Event>> {
        let mut response = self
            .db
            .query(format!("SELECT {EVENT_PROJECTION} FROM type::thing('event', $id)"))
            .bind(("id", id))
            .await?
            .check()?;

        let rows: Vec<EventRow> = response.take(0)?;

        Ok(rows.into_iter().next().map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list_events(&self, order: &EventOrder) -> Res<Vec<Event>> {
        let field = match order.field {
            EventField::Id => "id",
            EventField::EventDate => "event_date",
            EventField::CreatedAt => "created_at",
        };

        let direction = match order.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };

        // Ties fall back to creation order.
        let order_by = match order.field {
            EventField::Id => format!("id {direction}"),
            _ => format!("{field} {direction}, id ASC"),
        };

        // Order on the native values before the projection turns dates into strings.
        let mut response = self
            .db
            .query(format!("SELECT {EVENT_PROJECTION} FROM (SELECT * FROM event ORDER BY {order_by})"))
            .await?
            .check()?;

        let rows: Vec<EventRow> = response.take(0)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

// Tests.
