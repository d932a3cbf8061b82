//! Attendance endpoint.
//!
//! `POST /api/events/:id/attendance` records a check-in for a known
//! student identity.

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{EventId, StudentId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to record a check-in.
#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    /// Student identity (from an earlier registration)
    pub student_uuid: Option<Uuid>,
    /// Check-in method tag, default "manual"
    pub method: Option<String>,
}

/// Response after recording a check-in.
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    /// Attendance record identifier
    pub attendance_id: Uuid,
}

/// Record a check-in.
pub async fn mark_attendance(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<AttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceResponse>)> {
    let student_uuid = request
        .student_uuid
        .ok_or_else(|| Error::missing_field("student_uuid"))?;
    let method = request.method.unwrap_or_else(|| "manual".to_string());

    let outcome = state
        .store
        .record_attendance(
            EventId::from_uuid(event_id),
            StudentId::from_uuid(student_uuid),
            &method,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AttendanceResponse {
            attendance_id: *outcome.attendance_id().as_uuid(),
        }),
    ))
}
