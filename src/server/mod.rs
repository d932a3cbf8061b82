//! HTTP server module.
//!
//! Axum-based server plumbing: shared state, health check, and the
//! router wiring every endpoint to its handler.

pub mod health;
pub mod routes;
pub mod state;

pub use health::health_check;
pub use routes::build_router;
pub use state::AppState;
