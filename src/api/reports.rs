//! Reporting endpoints.
//!
//! Read-only aggregates over the ledger tables; see
//! [`crate::store::reports`] for the queries.

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::store::reports::{ActiveStudent, EventPopularity, EventStats};
use crate::types::{CollegeId, EventId, StudentId};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_POPULARITY_LIMIT: i64 = 50;
const DEFAULT_TOP_STUDENTS_LIMIT: i64 = 3;

/// Query parameters for ranking reports.
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// Optional college filter
    pub college_id: Option<String>,
    /// Maximum rows to return
    pub limit: Option<i64>,
}

/// Query parameters for the student participation report.
#[derive(Debug, Deserialize)]
pub struct ParticipationQuery {
    /// Student identity
    pub student_uuid: Option<Uuid>,
    /// Optional college filter
    pub college_id: Option<String>,
}

/// Participation count for one student.
#[derive(Debug, Serialize)]
pub struct ParticipationResponse {
    /// Student identity
    pub student_uuid: Uuid,
    /// Number of distinct events attended
    pub attended_events: i64,
}

/// Registrations per event, most popular first.
pub async fn event_popularity(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<EventPopularity>>> {
    let college_id = query.college_id.map(CollegeId::new);
    let limit = query.limit.unwrap_or(DEFAULT_POPULARITY_LIMIT);
    let rows = state
        .store
        .event_popularity(college_id.as_ref(), limit)
        .await?;
    Ok(Json(rows))
}

/// Aggregate statistics for one event.
pub async fn event_stats(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventStats>> {
    let stats = state.store.event_stats(EventId::from_uuid(event_id)).await?;
    Ok(Json(stats))
}

/// Distinct events attended by one student.
pub async fn student_participation(
    State(state): State<AppState>,
    Query(query): Query<ParticipationQuery>,
) -> Result<Json<ParticipationResponse>> {
    let student_uuid = query
        .student_uuid
        .ok_or_else(|| Error::missing_field("student_uuid"))?;
    let college_id = query.college_id.map(CollegeId::new);

    let attended_events = state
        .store
        .student_participation(StudentId::from_uuid(student_uuid), college_id.as_ref())
        .await?;

    Ok(Json(ParticipationResponse {
        student_uuid,
        attended_events,
    }))
}

/// Students ranked by distinct events attended.
pub async fn top_active_students(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<ActiveStudent>>> {
    let college_id = query.college_id.map(CollegeId::new);
    let limit = query.limit.unwrap_or(DEFAULT_TOP_STUDENTS_LIMIT);
    let rows = state
        .store
        .top_active_students(college_id.as_ref(), limit)
        .await?;
    Ok(Json(rows))
}
