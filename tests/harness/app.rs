//! Services over a temporary database with a pinned clock.

use std::sync::Arc;

use chrono::NaiveDate;
use profitcast::infrastructure::bootstrap::{build_forecast, Repositories, Services};
use profitcast::infrastructure::config::forecast::{ForecastConfig, ModelKind};
use profitcast::port::outbound::{ChangeNotifier, NoopChangeNotifier};
use rust_decimal_macros::dec;

use super::temp_db::TempDb;

/// Fixed-confidence (0.8) config without calibration.
pub fn fixed_config() -> ForecastConfig {
    let mut config: ForecastConfig = toml::from_str("").expect("default forecast config");
    config.model = ModelKind::Fixed;
    config.base_confidence = dec!(0.8);
    config.calibration_lookback_days = 0;
    config
}

/// Calibrated model over the last 30 settled days (maturation 14).
pub fn calibrated_config() -> ForecastConfig {
    let mut config = fixed_config();
    config.model = ModelKind::Calibrated;
    config.maturation_days = 14;
    config.calibration_lookback_days = 30;
    config
}

pub struct TestApp {
    pub db: TempDb,
    pub repos: Repositories,
    pub services: Services,
}

impl TestApp {
    pub fn new(name: &str, config: &ForecastConfig, today: NaiveDate) -> Self {
        Self::with_notifier(name, config, today, Arc::new(NoopChangeNotifier))
    }

    pub fn with_notifier(
        name: &str,
        config: &ForecastConfig,
        today: NaiveDate,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        let db = TempDb::create(name);
        let repos = Repositories::sqlite(db.pool());
        let forecast = build_forecast(config, &repos)
            .expect("build forecast service")
            .with_today(Arc::new(move || today));
        let services = Services::new(Arc::new(forecast), &repos, notifier);
        Self {
            db,
            repos,
            services,
        }
    }

    /// Same database, different model: simulates a redeploy.
    pub fn reopen(&self, config: &ForecastConfig, today: NaiveDate) -> Services {
        let forecast = build_forecast(config, &self.repos)
            .expect("build forecast service")
            .with_today(Arc::new(move || today));
        Services::new(Arc::new(forecast), &self.repos, Arc::new(NoopChangeNotifier))
    }
}
