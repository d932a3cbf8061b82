//! Campus events HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Start PostgreSQL
//! docker compose up -d
//!
//! # Run server
//! cargo run
//! ```

use campus_events::{AppState, CampusStore, Config, build_router};
use campus_events::types::CollegeId;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,campus_events=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Campus Events Server");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        postgres = %config.postgres.url,
        attendance_policy = ?config.app.attendance_policy,
        "Configuration loaded"
    );

    // Connect and prepare the schema
    let store = CampusStore::connect(&config.postgres, config.app.attendance_policy).await?;
    store.migrate().await?;
    store
        .seed_college(
            &CollegeId::new(config.app.default_college_id.clone()),
            "Sample College",
            "Asia/Kolkata",
        )
        .await?;
    tracing::info!("Database ready");

    // Build the router and serve
    let state = AppState::new(Arc::new(store), &config.app);
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
