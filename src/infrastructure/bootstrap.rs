//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! One-shot commands use [`Services::open`]; the server uses [`start`], which
//! also spawns the snapshot scheduler and sheet sync tasks and therefore must
//! run inside a tokio runtime.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::sheets::WebhookSheetPublisher;
use crate::adapter::outbound::sqlite::{
    connect, DbPool, SqliteAdGroupRepository, SqliteOrderRepository, SqliteSnapshotRepository,
    SqliteSpendRepository,
};
use crate::application::forecast::{Aggregator, ForecastService, ProjectionEstimator};
use crate::application::ledger::LedgerService;
use crate::application::snapshot::{SnapshotPersister, SnapshotScheduler, SnapshotSchedulerHandle};
use crate::application::sync::SheetSyncScheduler;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::forecast::ForecastConfig;
use crate::infrastructure::config::service::SheetsConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{
    AdGroupRepository, AdSpendRepository, ChangeNotifier, NoopChangeNotifier, OrderRepository,
    SnapshotRepository,
};

/// Repository handles shared by every service.
#[derive(Clone)]
pub struct Repositories {
    pub ad_groups: Arc<dyn AdGroupRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub spend: Arc<dyn AdSpendRepository>,
    pub snapshots: Arc<dyn SnapshotRepository>,
}

impl Repositories {
    /// SQLite repositories over one pool.
    #[must_use]
    pub fn sqlite(pool: &DbPool) -> Self {
        Self {
            ad_groups: Arc::new(SqliteAdGroupRepository::new(pool.clone())),
            orders: Arc::new(SqliteOrderRepository::new(pool.clone())),
            spend: Arc::new(SqliteSpendRepository::new(pool.clone())),
            snapshots: Arc::new(SqliteSnapshotRepository::new(pool.clone())),
        }
    }
}

/// The application services behind every inbound adapter.
#[derive(Clone)]
pub struct Services {
    pub forecast: Arc<ForecastService>,
    pub persister: Arc<SnapshotPersister>,
    pub ledger: Arc<LedgerService>,
}

impl Services {
    /// Wire services over `repos`; edits are announced to `notifier`.
    #[must_use]
    pub fn new(
        forecast: Arc<ForecastService>,
        repos: &Repositories,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        let persister = Arc::new(SnapshotPersister::new(
            forecast.clone(),
            repos.snapshots.clone(),
        ));
        let ledger = Arc::new(LedgerService::new(
            repos.ad_groups.clone(),
            repos.orders.clone(),
            repos.spend.clone(),
            notifier,
        ));
        Self {
            forecast,
            persister,
            ledger,
        }
    }

    /// Open the database and wire services without background tasks.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated, or the
    /// forecast model is misconfigured.
    pub fn open(config: &Config) -> Result<Self> {
        let pool = connect(&config.database)?;
        let repos = Repositories::sqlite(&pool);
        let forecast = Arc::new(build_forecast(&config.forecast, &repos)?);
        Ok(Self::new(forecast, &repos, Arc::new(NoopChangeNotifier)))
    }
}

/// Build the forecast service for the configured model.
///
/// # Errors
/// Returns a config error when the model cannot be built.
pub fn build_forecast(config: &ForecastConfig, repos: &Repositories) -> Result<ForecastService> {
    let model = config.build_model()?;
    info!(
        model = model.name(),
        model_version = model.version(),
        base_confidence = %config.base_confidence,
        "Forecast model selected"
    );
    let estimator =
        ProjectionEstimator::new(model, repos.snapshots.clone(), config.calibration_window());
    Ok(ForecastService::new(
        Aggregator::new(repos.orders.clone(), repos.spend.clone()),
        estimator,
        repos.ad_groups.clone(),
        config.max_range_days,
    ))
}

/// Start the sheet sync task, or return a no-op notifier when disabled.
///
/// # Errors
/// Returns an error if sync is enabled without a webhook URL or the HTTP
/// client cannot be built.
pub fn build_notifier(
    config: &SheetsConfig,
    forecast: &Arc<ForecastService>,
) -> Result<Arc<dyn ChangeNotifier>> {
    if !config.enabled {
        info!("Sheet sync disabled");
        return Ok(Arc::new(NoopChangeNotifier));
    }
    let url = config
        .webhook_url
        .as_deref()
        .ok_or(ConfigError::MissingField {
            field: "webhook_url",
        })?;
    let publisher = Arc::new(WebhookSheetPublisher::new(url, config.timeout())?);
    let handle = SheetSyncScheduler::new(config.sync(), forecast.clone(), publisher).start();
    Ok(Arc::new(handle))
}

/// Running services plus the handles of their background tasks.
pub struct Runtime {
    pub services: Services,
    pub snapshot_scheduler: Option<SnapshotSchedulerHandle>,
}

impl Runtime {
    /// Stop background tasks.
    pub async fn shutdown(&self) {
        if let Some(handle) = &self.snapshot_scheduler {
            handle.shutdown().await;
        }
    }
}

/// Open the database, wire services and spawn background tasks.
///
/// # Errors
/// Returns an error if the database cannot be opened or a component is
/// misconfigured.
pub fn start(config: &Config) -> Result<Runtime> {
    let pool = connect(&config.database)?;
    info!(database = %config.database, "Database ready");

    let repos = Repositories::sqlite(&pool);
    let forecast = Arc::new(build_forecast(&config.forecast, &repos)?);
    let notifier = build_notifier(&config.sheets, &forecast)?;
    let services = Services::new(forecast, &repos, notifier);

    let snapshot_scheduler = if config.snapshot.enabled {
        Some(SnapshotScheduler::new(config.snapshot.schedule(), services.persister.clone()).start())
    } else {
        warn!("Periodic snapshots disabled; history only grows through on-demand runs");
        None
    };

    Ok(Runtime {
        services,
        snapshot_scheduler,
    })
}
