//! Event creation, listing, and registration endpoints.
//!
//! - `POST /api/events` — create an event (validated before any write)
//! - `GET  /api/events/available` — list all events
//! - `POST /api/events/:id/register` — register a student

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::store::RegisterOutcome;
use crate::types::{CollegeId, Event, EventId, EventStatus, RegistrationStatus};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a new event.
///
/// Fields are optional at the serde level so that validation can
/// report which one is missing, rather than a generic decode error.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Owning college
    pub college_id: Option<String>,
    /// Event title
    pub title: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Event type tag
    pub event_type: Option<String>,
    /// Start timestamp, ISO 8601
    pub start_ts: Option<String>,
    /// End timestamp, ISO 8601
    pub end_ts: Option<String>,
    /// Venue
    pub location: Option<String>,
    /// Capacity; accepted as a JSON number or numeric string
    pub capacity: Option<serde_json::Value>,
    /// Lifecycle status, default "published"
    pub status: Option<String>,
}

impl CreateEventRequest {
    /// Validate the request and build the event to persist.
    ///
    /// Total and side-effect-free: every failure is reported before
    /// anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] distinguishing missing-field,
    /// bad-integer, bad-timestamp, and end-before-start cases.
    pub fn validate(self) -> Result<Event> {
        let college_id = require(self.college_id, "college_id")?;
        let title = require(self.title, "title")?;
        let event_type = require(self.event_type, "event_type")?;
        let start_raw = require(self.start_ts, "start_ts")?;
        let end_raw = require(self.end_ts, "end_ts")?;
        let location = require(self.location, "location")?;

        let capacity = match self.capacity {
            None | Some(serde_json::Value::Null) => {
                return Err(Error::missing_field("capacity"));
            }
            Some(value) => parse_capacity(&value)?,
        };

        let start_ts = parse_timestamp(&start_raw)?;
        let end_ts = parse_timestamp(&end_raw)?;
        if end_ts <= start_ts {
            return Err(Error::Validation("end_ts must be after start_ts".to_string()));
        }

        let status = match self.status.as_deref() {
            None | Some("") => EventStatus::default(),
            Some(s) => EventStatus::parse(s)
                .map_err(|_| Error::Validation(format!("unknown status: {s}")))?,
        };

        Ok(Event {
            event_id: EventId::new(),
            college_id: CollegeId::new(college_id),
            title,
            description: self.description.unwrap_or_default(),
            event_type,
            start_ts,
            end_ts,
            location,
            capacity,
            status,
        })
    }
}

fn require(field: Option<String>, name: &'static str) -> Result<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_field(name)),
    }
}

fn parse_capacity(value: &serde_json::Value) -> Result<i32> {
    let n = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::Validation("capacity must be an integer".to_string()))?,
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| Error::Validation("capacity must be an integer".to_string()))?,
        _ => return Err(Error::Validation("capacity must be an integer".to_string())),
    };

    if n <= 0 {
        return Err(Error::Validation(
            "capacity must be a positive number".to_string(),
        ));
    }
    i32::try_from(n).map_err(|_| Error::Validation("capacity must be a positive number".to_string()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::Validation(
                "Invalid datetime format. Use ISO 8601 (e.g., 2025-09-20T10:00:00Z)".to_string(),
            )
        })
}

/// Response after creating an event.
#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    /// Created event ID
    pub event_id: EventId,
}

/// Request to register for an event.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Student name (recorded on first sight of the email)
    pub name: Option<String>,
    /// Student email, the operational identity key
    pub email: Option<String>,
    /// College; falls back to the configured default
    pub college_id: Option<String>,
}

/// Response for a registration request.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Registration identifier (stable across replays)
    pub registration_id: Uuid,
    /// Registration status
    pub status: RegistrationStatus,
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>)> {
    let event = request.validate()?;
    let event_id = event.event_id;

    state.store.create_event(&event).await?;
    tracing::info!(event_id = %event_id, title = %event.title, "Event created");

    Ok((StatusCode::CREATED, Json(CreateEventResponse { event_id })))
}

/// List all events.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.store.list_events().await?))
}

/// Register a student for an event.
///
/// Resolves the student identity first (find-or-create), then runs
/// the capacity-guarded insert. Replaying the same (event, student)
/// pair returns the original registration with 200 instead of 201.
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let name = request
        .name
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::missing_field("name"))?;
    let email = request
        .email
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::missing_field("email"))?;
    let college_id = request
        .college_id
        .filter(|s| !s.is_empty())
        .map_or_else(|| state.default_college_id.clone(), CollegeId::new);

    let event_id = EventId::from_uuid(event_id);
    let student_uuid = state
        .store
        .resolve_student(&college_id, &name, &email)
        .await?;

    match state.store.register(event_id, student_uuid).await? {
        RegisterOutcome::Created { registration_id } => Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                registration_id: *registration_id.as_uuid(),
                status: RegistrationStatus::Registered,
            }),
        )),
        RegisterOutcome::Existing {
            registration_id,
            status,
        } => Ok((
            StatusCode::OK,
            Json(RegisterResponse {
                registration_id: *registration_id.as_uuid(),
                status,
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn full_request() -> CreateEventRequest {
        CreateEventRequest {
            college_id: Some("college-1".to_string()),
            title: Some("Rust Workshop".to_string()),
            description: Some("Intro to ownership".to_string()),
            event_type: Some("workshop".to_string()),
            start_ts: Some("2025-09-20T10:00:00Z".to_string()),
            end_ts: Some("2025-09-20T12:00:00Z".to_string()),
            location: Some("Lab 3".to_string()),
            capacity: Some(serde_json::json!(30)),
            status: None,
        }
    }

    #[test]
    fn valid_request_builds_event_with_defaults() {
        let event = full_request().validate().unwrap();
        assert_eq!(event.capacity, 30);
        assert_eq!(event.status, EventStatus::Published);
        assert_eq!(event.description, "Intro to ownership");
    }

    #[test]
    fn missing_field_is_named_in_the_error() {
        let mut request = full_request();
        request.title = None;
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn empty_field_counts_as_missing() {
        let mut request = full_request();
        request.location = Some(String::new());
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "location is required");
    }

    #[test]
    fn capacity_accepts_numeric_strings() {
        let mut request = full_request();
        request.capacity = Some(serde_json::json!("25"));
        assert_eq!(request.validate().unwrap().capacity, 25);
    }

    #[test]
    fn non_integer_capacity_is_rejected() {
        let mut request = full_request();
        request.capacity = Some(serde_json::json!("lots"));
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "capacity must be an integer");
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut request = full_request();
        request.capacity = Some(serde_json::json!(0));
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "capacity must be a positive number");
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let mut request = full_request();
        request.start_ts = Some("next tuesday".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut request = full_request();
        request.end_ts = Some("2025-09-20T09:00:00Z".to_string());
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "end_ts must be after start_ts");
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let mut request = full_request();
        request.end_ts.clone_from(&request.start_ts);
        assert!(request.validate().is_err());
    }
}
