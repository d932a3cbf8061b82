//! HTTP API handlers.
//!
//! Thin axum handlers: decode and validate the request, call one
//! store operation, shape the response. All concurrency control lives
//! in the store.

pub mod attendance;
pub mod events;
pub mod feedback;
pub mod reports;
