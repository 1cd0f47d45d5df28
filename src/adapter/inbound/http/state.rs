//! Shared handler state.

use std::sync::Arc;

use crate::application::forecast::ForecastService;
use crate::application::ledger::LedgerService;
use crate::application::snapshot::SnapshotPersister;
use crate::error::Error;
use crate::infrastructure::bootstrap::Services;

use super::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub forecast: Arc<ForecastService>,
    pub persister: Arc<SnapshotPersister>,
    pub ledger: Arc<LedgerService>,
    /// Days covered when a query omits `from`/`to`.
    pub default_range_days: u32,
}

impl AppState {
    #[must_use]
    pub fn new(services: Services, default_range_days: u32) -> Self {
        Self {
            forecast: services.forecast,
            persister: services.persister,
            ledger: services.ledger,
            default_range_days,
        }
    }
}

/// Run a synchronous repository-backed call off the async workers.
pub async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(Error::from)?
        .map_err(ApiError::from)
}
