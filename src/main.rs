//! Countdown Timer - a countdown engine with a duration picker
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::completion_notifier_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, manual_ack={}",
          config.host, config.port, config.manual_ack);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone())?);

    // Announce finished countdowns
    let notifier_state = Arc::clone(&state);
    let auto_acknowledge = !config.manual_ack;
    tokio::spawn(async move {
        completion_notifier_task(notifier_state, auto_acknowledge).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start       - Start counting down from the picked duration");
    info!("  POST /timer/cancel      - Cancel the running countdown");
    info!("  POST /timer/acknowledge - Clear the completion signal");
    info!("  GET  /picker            - Show the picker fields");
    info!("  PUT  /picker/:field     - Edit hours, minutes or seconds");
    info!("  GET  /status            - Check timer state and readout");
    info!("  GET  /health            - Health check");

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

    state.engine.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
