//! Attendance check-ins.
//!
//! Whether repeated check-ins for the same (event, student) pair keep
//! multiplying rows is configurable; see
//! [`crate::config::AttendancePolicy`].

use super::CampusStore;
use crate::config::AttendancePolicy;
use crate::error::{Error, Result};
use crate::types::{AttendanceId, EventId, StudentId};
use chrono::Utc;
use uuid::Uuid;

/// Outcome of recording a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// A new attendance row was written.
    Recorded(AttendanceId),
    /// Dedupe policy is `Single` and a row already existed.
    AlreadyCheckedIn(AttendanceId),
}

impl CheckinOutcome {
    /// The attendance id, whichever branch was taken.
    #[must_use]
    pub const fn attendance_id(&self) -> AttendanceId {
        match self {
            Self::Recorded(id) | Self::AlreadyCheckedIn(id) => *id,
        }
    }
}

impl CampusStore {
    /// Record a check-in for a (event, student) pair.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn record_attendance(
        &self,
        event_id: EventId,
        student_uuid: StudentId,
        method: &str,
    ) -> Result<CheckinOutcome> {
        match self.attendance_policy {
            AttendancePolicy::AllowRepeats => {
                let attendance_id = AttendanceId::new();
                sqlx::query(
                    "INSERT INTO attendance
                         (attendance_id, event_id, student_uuid, checkin_at, method)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(attendance_id)
                .bind(event_id)
                .bind(student_uuid)
                .bind(Utc::now())
                .bind(method)
                .execute(&self.pool)
                .await?;

                Ok(CheckinOutcome::Recorded(attendance_id))
            }
            AttendancePolicy::Single => {
                let inserted: Option<(Uuid,)> = sqlx::query_as(
                    "INSERT INTO attendance
                         (attendance_id, event_id, student_uuid, checkin_at, method)
                     VALUES ($1, $2, $3, $4, $5)
                     ON CONFLICT (event_id, student_uuid) DO NOTHING
                     RETURNING attendance_id",
                )
                .bind(Uuid::new_v4())
                .bind(event_id)
                .bind(student_uuid)
                .bind(Utc::now())
                .bind(method)
                .fetch_optional(&self.pool)
                .await?;

                if let Some((id,)) = inserted {
                    return Ok(CheckinOutcome::Recorded(AttendanceId::from_uuid(id)));
                }

                let (id,): (Uuid,) = sqlx::query_as(
                    "SELECT attendance_id FROM attendance
                     WHERE event_id = $1 AND student_uuid = $2",
                )
                .bind(event_id)
                .bind(student_uuid)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    Error::Database("attendance row vanished after conflict".to_string())
                })?;

                Ok(CheckinOutcome::AlreadyCheckedIn(AttendanceId::from_uuid(id)))
            }
        }
    }
}
