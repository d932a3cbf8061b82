//! Identity resolution for students.
//!
//! A student identity is keyed operationally by (college, email). The
//! resolver is a single atomic upsert, so two concurrent first
//! registrations with the same email still produce exactly one row.

use super::CampusStore;
use crate::error::Result;
use crate::types::{CollegeId, StudentId};
use uuid::Uuid;

impl CampusStore {
    /// Map a (college, email) pair to a stable student identity,
    /// creating one if absent.
    ///
    /// The `DO UPDATE` arm is a no-op touch of the conflicting row:
    /// it makes `RETURNING` yield the existing identity without
    /// changing the name on record.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn resolve_student(
        &self,
        college_id: &CollegeId,
        name: &str,
        email: &str,
    ) -> Result<StudentId> {
        let (student_uuid,): (Uuid,) = sqlx::query_as(
            "INSERT INTO students (student_uuid, college_id, student_local_id, name, email)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (college_id, email) DO UPDATE SET email = EXCLUDED.email
             RETURNING student_uuid",
        )
        .bind(Uuid::new_v4())
        .bind(college_id)
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(StudentId::from_uuid(student_uuid))
    }
}
