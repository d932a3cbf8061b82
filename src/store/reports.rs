//! Reporting read models.
//!
//! Derived aggregates over the ledger tables. These impose no new
//! invariants; they only have to tolerate empty inputs (no divide by
//! zero, NULL averages).

use super::CampusStore;
use crate::error::Result;
use crate::types::{CollegeId, EventId, StudentId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One row of the event popularity ranking.
#[derive(Debug, Clone, Serialize)]
pub struct EventPopularity {
    /// Event identifier
    pub event_id: EventId,
    /// Event title
    pub title: String,
    /// Event type tag
    pub event_type: String,
    /// Event start
    pub start_ts: DateTime<Utc>,
    /// Number of registrations
    pub registrations: i64,
}

/// Aggregate statistics for a single event.
#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    /// Event identifier
    pub event_id: EventId,
    /// Number of registrations
    pub registrations: i64,
    /// Number of distinct students who checked in
    pub attended: i64,
    /// Attendance percentage; `None` when there are no registrations
    pub attendance_pct: Option<f64>,
    /// Average rating; `None` when no feedback exists
    pub avg_rating: Option<f64>,
}

/// One row of the top-active-students ranking.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveStudent {
    /// Student identifier
    pub student_uuid: StudentId,
    /// Student name on record
    pub name: String,
    /// Number of distinct events attended
    pub events_attended: i64,
}

impl CampusStore {
    /// Registrations per event, most popular first.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn event_popularity(
        &self,
        college_id: Option<&CollegeId>,
        limit: i64,
    ) -> Result<Vec<EventPopularity>> {
        let rows: Vec<(Uuid, String, String, DateTime<Utc>, i64)> = sqlx::query_as(
            "SELECT e.event_id, e.title, e.event_type, e.start_ts,
                    COUNT(r.registration_id) AS registrations
             FROM events e
             LEFT JOIN registrations r ON r.event_id = e.event_id
             WHERE ($1::text IS NULL OR e.college_id = $1)
             GROUP BY e.event_id
             ORDER BY registrations DESC
             LIMIT $2",
        )
        .bind(college_id.map(CollegeId::as_str))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(event_id, title, event_type, start_ts, registrations)| EventPopularity {
                event_id: EventId::from_uuid(event_id),
                title,
                event_type,
                start_ts,
                registrations,
            })
            .collect())
    }

    /// Registration, attendance, and rating aggregates for one event.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn event_stats(&self, event_id: EventId) -> Result<EventStats> {
        let (registrations,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        let (attended,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT student_uuid) FROM attendance WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        let (avg_rating,): (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating)::float8 FROM feedback WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        // Undefined for zero-registration events, not a divide by zero.
        #[allow(clippy::cast_precision_loss)]
        let attendance_pct =
            (registrations > 0).then(|| attended as f64 / registrations as f64 * 100.0);

        Ok(EventStats {
            event_id,
            registrations,
            attended,
            attendance_pct,
            avg_rating,
        })
    }

    /// Distinct events a student has attended, optionally scoped to a
    /// college.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn student_participation(
        &self,
        student_uuid: StudentId,
        college_id: Option<&CollegeId>,
    ) -> Result<i64> {
        let (attended_events,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT a.event_id)
             FROM attendance a
             JOIN events e ON e.event_id = a.event_id
             WHERE a.student_uuid = $1
               AND ($2::text IS NULL OR e.college_id = $2)",
        )
        .bind(student_uuid)
        .bind(college_id.map(CollegeId::as_str))
        .fetch_one(&self.pool)
        .await?;

        Ok(attended_events)
    }

    /// Students ranked by distinct events attended.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn top_active_students(
        &self,
        college_id: Option<&CollegeId>,
        limit: i64,
    ) -> Result<Vec<ActiveStudent>> {
        let rows: Vec<(Uuid, String, i64)> = sqlx::query_as(
            "SELECT s.student_uuid, s.name, COUNT(DISTINCT a.event_id) AS events_attended
             FROM students s
             JOIN attendance a ON a.student_uuid = s.student_uuid
             JOIN events e ON e.event_id = a.event_id
             WHERE ($1::text IS NULL OR s.college_id = $1)
             GROUP BY s.student_uuid
             ORDER BY events_attended DESC
             LIMIT $2",
        )
        .bind(college_id.map(CollegeId::as_str))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(student_uuid, name, events_attended)| ActiveStudent {
                student_uuid: StudentId::from_uuid(student_uuid),
                name,
                events_attended,
            })
            .collect())
    }
}
