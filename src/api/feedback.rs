//! Feedback endpoint.
//!
//! `POST /api/events/:id/feedback` — 201 on first submission, 200
//! with status "updated" when an earlier submission is overwritten.

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::store::FeedbackOutcome;
use crate::types::{EventId, StudentId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to submit or overwrite feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// Student identity
    pub student_uuid: Option<Uuid>,
    /// Rating, 1 to 5
    pub rating: Option<i32>,
    /// Free-form comments
    pub comments: Option<String>,
}

/// Response after submitting feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// Feedback row identifier
    pub feedback_id: Uuid,
    /// "created" or "updated"
    pub status: &'static str,
}

/// Submit or overwrite feedback for a (event, student) pair.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>)> {
    let student_uuid = request
        .student_uuid
        .ok_or_else(|| Error::missing_field("student_uuid"))?;

    if let Some(rating) = request.rating {
        if !(1..=5).contains(&rating) {
            return Err(Error::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
    }

    let outcome = state
        .store
        .submit_feedback(
            EventId::from_uuid(event_id),
            StudentId::from_uuid(student_uuid),
            request.rating,
            request.comments.as_deref(),
        )
        .await?;

    match outcome {
        FeedbackOutcome::Created { feedback_id } => Ok((
            StatusCode::CREATED,
            Json(FeedbackResponse {
                feedback_id: *feedback_id.as_uuid(),
                status: "created",
            }),
        )),
        FeedbackOutcome::Updated { feedback_id } => Ok((
            StatusCode::OK,
            Json(FeedbackResponse {
                feedback_id: *feedback_id.as_uuid(),
                status: "updated",
            }),
        )),
    }
}
