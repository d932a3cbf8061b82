//! Registration ledger and capacity guard.
//!
//! The single correctness-critical path of the system: an event must
//! never be over-subscribed, and a student registers at most once per
//! event, under arbitrary concurrency.
//!
//! The count-then-insert sequence has a classic TOCTOU race, so the
//! whole operation runs in one transaction that takes a `FOR UPDATE`
//! row lock on the event. The lock serializes registrations for one
//! event while requests for other events proceed untouched. Within
//! the critical section the ordering is fixed: idempotent replay is
//! checked before capacity, so a student already on the ledger is
//! never bounced with "full".

use super::CampusStore;
use crate::error::{Error, Result};
use crate::types::{EventId, RegistrationId, RegistrationStatus, StudentId};
use chrono::Utc;
use uuid::Uuid;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new ledger row was written.
    Created {
        /// Identifier of the fresh registration
        registration_id: RegistrationId,
    },
    /// The student already held a registration; nothing was written.
    Existing {
        /// Identifier of the original registration
        registration_id: RegistrationId,
        /// Status recorded on the original registration
        status: RegistrationStatus,
    },
}

impl CampusStore {
    /// Register a student for an event.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the event does not exist
    /// - [`Error::CapacityExceeded`] if the event is full and the
    ///   student holds no prior registration
    /// - [`Error::Database`] on storage failure
    pub async fn register(
        &self,
        event_id: EventId,
        student_uuid: StudentId,
    ) -> Result<RegisterOutcome> {
        let mut tx = self.pool.begin().await?;

        // Lock the event row: this is the per-event critical section.
        let event: Option<(i32,)> =
            sqlx::query_as("SELECT capacity FROM events WHERE event_id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((capacity,)) = event else {
            return Err(Error::NotFound("Event"));
        };

        // Idempotent replay takes precedence over the capacity check.
        let existing: Option<(Uuid, String)> = sqlx::query_as(
            "SELECT registration_id, status FROM registrations
             WHERE event_id = $1 AND student_uuid = $2",
        )
        .bind(event_id)
        .bind(student_uuid)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((registration_id, status)) = existing {
            // Read-only path; the dropped transaction rolls back the lock.
            return Ok(RegisterOutcome::Existing {
                registration_id: RegistrationId::from_uuid(registration_id),
                status: RegistrationStatus::parse(&status)?,
            });
        }

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations
             WHERE event_id = $1 AND status = 'registered'",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if count >= i64::from(capacity) {
            return Err(Error::CapacityExceeded);
        }

        let registration_id = RegistrationId::new();
        sqlx::query(
            "INSERT INTO registrations
                 (registration_id, event_id, student_uuid, registered_at, status)
             VALUES ($1, $2, $3, $4, 'registered')",
        )
        .bind(registration_id)
        .bind(event_id)
        .bind(student_uuid)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            event_id = %event_id,
            student_uuid = %student_uuid,
            registration_id = %registration_id,
            "Registration recorded"
        );

        Ok(RegisterOutcome::Created { registration_id })
    }

    /// Number of active registrations for an event.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn registration_count(&self, event_id: EventId) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations
             WHERE event_id = $1 AND status = 'registered'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
