//! Application state for the HTTP server.

use crate::config::AppConfig;
use crate::store::CampusStore;
use crate::types::CollegeId;
use std::sync::Arc;

/// Shared state cloned (cheaply, via `Arc`) into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Storage layer handle
    pub store: Arc<CampusStore>,
    /// College assigned to registrations that omit `college_id`
    pub default_college_id: CollegeId,
}

impl AppState {
    /// Create application state from a store and app configuration.
    #[must_use]
    pub fn new(store: Arc<CampusStore>, app: &AppConfig) -> Self {
        Self {
            store,
            default_college_id: CollegeId::new(app.default_college_id.clone()),
        }
    }
}
