//! Campus event registration and reporting backend.
//!
//! Registers students for events, tracks capacity, records
//! attendance, collects feedback, and serves participation reports.
//!
//! The part that matters is the registration-and-capacity consistency
//! engine: an event is never over-subscribed and a student is
//! registered at most once per event, even under concurrent requests.
//! That contract is enforced entirely in [`store`] — a per-event row
//! lock around the count-then-insert sequence, and atomic
//! `ON CONFLICT` upserts for student identity and feedback. Handlers
//! in [`api`] stay thin.
//!
//! # Layout
//!
//! - [`config`] — environment-driven configuration
//! - [`types`] — identifiers, status enums, entities
//! - [`error`] — domain error taxonomy + HTTP mapping
//! - [`store`] — `PostgreSQL` storage layer, one method per operation
//! - [`api`] — axum request handlers
//! - [`server`] — router, state, health check

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;

pub use config::{AttendancePolicy, Config};
pub use error::{Error, Result};
pub use server::{AppState, build_router};
pub use store::CampusStore;
