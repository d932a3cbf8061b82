//! Router configuration.
//!
//! Builds the complete axum router with all endpoints.

use super::health::health_check;
use super::state::AppState;
use crate::api::{attendance, events, feedback, reports};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the complete axum router.
///
/// Write paths under `/api/events`, read models under `/api/reports`,
/// plus an unauthenticated health check.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Event management
        .route("/events", post(events::create_event))
        .route("/events/available", get(events::list_events))
        .route("/events/:id/register", post(events::register))
        .route("/events/:id/attendance", post(attendance::mark_attendance))
        .route("/events/:id/feedback", post(feedback::submit_feedback))
        // Reporting read models
        .route("/reports/event_popularity", get(reports::event_popularity))
        .route("/reports/event_stats/:id", get(reports::event_stats))
        .route(
            "/reports/student_participation",
            get(reports::student_participation),
        )
        .route(
            "/reports/top_active_students",
            get(reports::top_active_students),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
}
