//! Task gateway binary.
//!
//! Standalone HTTP service translating task CRUD requests into queries
//! against the hosted persistence service.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use task_gateway::{build_router, AppState, Config, SupabaseStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("task_gateway=info".parse()?))
        .init();

    info!("Starting task gateway...");

    // Load configuration
    let config = Config::default();

    // Initialize persistence client
    let store = SupabaseStore::new(
        &config.supabase_url,
        &config.supabase_key,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build persistence client")?;

    info!(url = %config.supabase_url, "Persistence client configured");

    // Build application state and router
    let state = AppState {
        config: config.clone(),
        store,
    };
    let app = build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "Task gateway listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
