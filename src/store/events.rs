//! Event persistence.
//!
//! Events are immutable once created; there is no update path.

use super::CampusStore;
use crate::error::Result;
use crate::types::{CollegeId, Event, EventId, EventStatus};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Raw event row as stored; status is parsed at the boundary.
type EventRow = (
    Uuid,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
    String,
    i32,
    String,
);

fn into_event(row: EventRow) -> Result<Event> {
    let (event_id, college_id, title, description, event_type, start_ts, end_ts, location, capacity, status) =
        row;
    Ok(Event {
        event_id: EventId::from_uuid(event_id),
        college_id: CollegeId::new(college_id),
        title,
        description,
        event_type,
        start_ts,
        end_ts,
        location,
        capacity,
        status: EventStatus::parse(&status)?,
    })
}

impl CampusStore {
    /// Persist a new event.
    ///
    /// Validation is the caller's responsibility and happens before
    /// this is reached; the schema-level checks are a backstop.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    pub async fn create_event(&self, event: &Event) -> Result<()> {
        sqlx::query(
            "INSERT INTO events
                 (event_id, college_id, title, description, event_type,
                  start_ts, end_ts, location, capacity, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(event.event_id)
        .bind(&event.college_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.event_type)
        .bind(event.start_ts)
        .bind(event.end_ts)
        .bind(&event.location)
        .bind(event.capacity)
        .bind(event.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a single event by id.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn get_event(&self, event_id: EventId) -> Result<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT event_id, college_id, title, description, event_type,
                    start_ts, end_ts, location, capacity, status
             FROM events WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_event).transpose()
    }

    /// List every event, newest start first.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT event_id, college_id, title, description, event_type,
                    start_ts, end_ts, location, capacity, status
             FROM events ORDER BY start_ts DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_event).collect()
    }
}
