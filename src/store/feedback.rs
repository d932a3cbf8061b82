//! Feedback upsert.
//!
//! One feedback row per (event, student); later submissions overwrite
//! earlier ones. The whole operation is a single `ON CONFLICT DO
//! UPDATE` statement, so concurrent submissions cannot produce a
//! duplicate row or a lost update.

use super::CampusStore;
use crate::error::Result;
use crate::types::{EventId, FeedbackId, StudentId};
use chrono::Utc;
use uuid::Uuid;

/// Outcome of a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// First submission for this (event, student) pair.
    Created {
        /// Identifier of the new feedback row
        feedback_id: FeedbackId,
    },
    /// An earlier submission was overwritten.
    Updated {
        /// Identifier of the surviving feedback row
        feedback_id: FeedbackId,
    },
}

impl CampusStore {
    /// Insert or overwrite feedback for a (event, student) pair.
    ///
    /// `xmax = 0` is true only for a freshly inserted row, which is
    /// how one round-trip distinguishes create from overwrite.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub async fn submit_feedback(
        &self,
        event_id: EventId,
        student_uuid: StudentId,
        rating: Option<i32>,
        comments: Option<&str>,
    ) -> Result<FeedbackOutcome> {
        let (feedback_id, inserted): (Uuid, bool) = sqlx::query_as(
            "INSERT INTO feedback
                 (feedback_id, event_id, student_uuid, rating, comments, submitted_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (event_id, student_uuid) DO UPDATE SET
                 rating = EXCLUDED.rating,
                 comments = EXCLUDED.comments,
                 submitted_at = EXCLUDED.submitted_at
             RETURNING feedback_id, (xmax = 0) AS inserted",
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(student_uuid)
        .bind(rating)
        .bind(comments)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let feedback_id = FeedbackId::from_uuid(feedback_id);
        if inserted {
            Ok(FeedbackOutcome::Created { feedback_id })
        } else {
            Ok(FeedbackOutcome::Updated { feedback_id })
        }
    }
}
