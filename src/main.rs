//! Punch Clock - A state-managed HTTP server for tracking work sessions
//!
//! This is the main entry point for the punch-clock application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use punch_clock::{
    api::create_router,
    config::Config,
    services::InMemoryStore,
    state::{AppState, SessionTracker},
    tasks::spawn_ticker,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("punch_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting punch-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, user={}, work_hours={}",
          config.host, config.port, config.user, config.work_hours);

    // Create the session tracker over the record store
    let store = Arc::new(InMemoryStore::new());
    let tracker = Arc::new(
        SessionTracker::new(config.user.clone(), store).with_retry(config.retry_policy()),
    );

    // Pick up a session left open by a previous run
    match tracker.restore().await {
        Ok(Some(session)) => info!("Resumed open session {}", session.id),
        Ok(None) => info!("No open session, tracker idle"),
        Err(e) => warn!(
            "Failed to restore open session, retry with POST /session/restore: {}",
            e
        ),
    }

    // Start the tick task; it stops when the handle is dropped
    let ticker = spawn_ticker(Arc::clone(&tracker));

    // Create HTTP router with all endpoints
    let state = Arc::new(AppState::new(
        tracker,
        config.port,
        config.host.clone(),
        config.work_hours,
    ));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session/start  - Start a work session");
    info!("  POST /session/stop   - Stop the current session");
    info!("  POST /session/pause  - Pause the current session");
    info!("  POST /session/resume - Resume a paused session");
    info!("  POST /session/restore - Adopt a session left open in the store");
    info!("  POST /break/start    - Start a break (lunch, short, personal)");
    info!("  POST /break/end      - End the current break");
    info!("  GET  /sessions/:id   - Session with its breaks");
    info!("  GET  /status         - Timer and session status");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    ticker.stop();
    info!("Server shutdown complete");
    Ok(())
}
