//! `serve`: run the REST API with background jobs.

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::http::{self, AppState};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Serve until interrupted, then stop the background jobs.
///
/// # Errors
/// Returns an error if startup fails or the listener cannot bind.
pub async fn execute(config: &Config) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let startup = config.clone();
    let runtime = tokio::task::spawn_blocking(move || bootstrap::start(&startup)).await??;

    let state = AppState::new(runtime.services.clone(), config.server.default_range_days);
    let served = http::serve(addr, state, shutdown_signal()).await;

    runtime.shutdown().await;
    info!("Server stopped");
    served
}
