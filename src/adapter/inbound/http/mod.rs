//! REST surface (axum).
//!
//! ```text
//! GET  /health
//! GET  /profit-forecast/ad-group-with-cost?from&to&adGroupId
//! GET  /profit-forecast/summary?from&to&adGroupId
//! GET  /profit-forecast/report?from&to&adGroupId
//! GET  /profit-forecast/snapshot/run?date|from&to
//! GET  /profit-forecast/snapshot/history?from&to&adGroupId
//! GET  /ad-groups        PUT /ad-groups
//! PUT  /orders
//! PUT  /ad-spend
//! ```

pub mod error;
pub mod forecast;
pub mod health;
pub mod ledger;
pub mod query;
pub mod snapshot;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let forecast = Router::new()
        .route("/ad-group-with-cost", get(forecast::ad_group_with_cost))
        .route("/summary", get(forecast::summary))
        .route("/report", get(forecast::report))
        .route("/snapshot/run", get(snapshot::run))
        .route("/snapshot/history", get(snapshot::history));

    Router::new()
        .route("/health", get(health::health))
        .nest("/profit-forecast", forecast)
        .route(
            "/ad-groups",
            put(ledger::put_ad_group).get(ledger::list_ad_groups),
        )
        .route("/orders", put(ledger::put_order))
        .route("/ad-spend", put(ledger::put_spend))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
