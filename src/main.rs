//! Matchclock - clock, timer, stopwatch and football match engine
//!
//! This is the main entry point for the matchclock daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use matchclock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{notification_log_task, tick_driver_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("matchclock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting matchclock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, mode={:?}, alarm_past_target={:?}",
          config.host, config.port, config.tick_ms, config.mode, config.alarm_past_target);

    let addr = config.address();

    // Create application state
    let state = Arc::new(AppState::new(config)?);

    // Log every notification the sessions produce
    let log_state = Arc::clone(&state);
    tokio::spawn(async move {
        notification_log_task(log_state).await;
    });

    // Start the tick source driving both windows
    let tick_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        tick_driver_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /widget/{{mode,timer,start,pause,resume,reset}}");
    info!("  POST /widget/alarm/{{enable,arm,disarm}}");
    info!("  POST /widget/match/{{start,end,goal,log}}");
    info!("  POST /tournament/match/{{start,end,goal,log}}");
    info!("  GET  /tournament/results");
    info!("  GET  /status");
    info!("  GET  /health");

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

    ticker.abort();
    info!("Server shutdown complete");
    Ok(())
}
