//! Forecast service: the read-side use cases behind the report endpoints.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, instrument};

use super::aggregator::Aggregator;
use super::blender::{blend_all, summarize};
use super::projection::ProjectionEstimator;
use crate::domain::{
    AdGroupId, BlendedRow, DailyAdGroupForecastRow, DateRange, ForecastReport, ForecastSummary,
};
use crate::error::{Error, Result};
use crate::port::outbound::AdGroupRepository;

/// Source of "today" for calibration windows and default ranges.
pub type Today = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// A validated-on-use report query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub range: DateRange,
    pub ad_group_id: Option<AdGroupId>,
}

impl ForecastQuery {
    #[must_use]
    pub fn new(range: DateRange, ad_group_id: Option<AdGroupId>) -> Self {
        Self { range, ad_group_id }
    }
}

pub struct ForecastService {
    aggregator: Aggregator,
    estimator: ProjectionEstimator,
    ad_groups: Arc<dyn AdGroupRepository>,
    max_range_days: u32,
    today: Today,
}

impl ForecastService {
    pub fn new(
        aggregator: Aggregator,
        estimator: ProjectionEstimator,
        ad_groups: Arc<dyn AdGroupRepository>,
        max_range_days: u32,
    ) -> Self {
        Self {
            aggregator,
            estimator,
            ad_groups,
            max_range_days,
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Replace the clock, mainly for tests.
    #[must_use]
    pub fn with_today(mut self, today: Today) -> Self {
        self.today = today;
        self
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Last settled day. Snapshots up to it are the history calibration
    /// measures against and must not be recomputed.
    #[must_use]
    pub fn settled_through(&self) -> NaiveDate {
        self.estimator.window().settled_through(self.today())
    }

    #[must_use]
    pub fn model_name(&self) -> &'static str {
        self.estimator.model().name()
    }

    #[must_use]
    pub fn model_version(&self) -> u32 {
        self.estimator.model().version()
    }

    /// Reject over-long ranges and unknown ad groups.
    ///
    /// # Errors
    /// Returns a domain error for an over-long range and
    /// [`Error::UnknownAdGroup`] for an unregistered filter.
    pub fn validate(&self, range: &DateRange, ad_group: Option<&AdGroupId>) -> Result<()> {
        range.ensure_max_days(self.max_range_days)?;
        if let Some(id) = ad_group {
            if !self.ad_groups.ad_group_exists(id)? {
                return Err(Error::UnknownAdGroup(id.to_string()));
            }
        }
        Ok(())
    }

    /// Raw forecast rows for `range`, as persisted by snapshots.
    ///
    /// # Errors
    /// Propagates validation and repository failures.
    #[instrument(skip(self), fields(from = %range.from(), to = %range.to()))]
    pub fn compute(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<DailyAdGroupForecastRow>> {
        self.validate(range, ad_group)?;

        let baselines = self.aggregator.load(range, ad_group)?;
        let groups: BTreeSet<AdGroupId> = baselines.keys().map(|(_, id)| id.clone()).collect();
        let calibrations = self
            .estimator
            .calibrate(&self.aggregator, self.today(), &groups)?;
        let rows = self.estimator.project(baselines, &calibrations);

        debug!(
            rows = rows.len(),
            model = self.model_name(),
            "Computed forecast rows"
        );
        Ok(rows)
    }

    /// Blended rows for the query (`ad-group-with-cost`).
    ///
    /// # Errors
    /// Propagates validation and repository failures.
    pub fn rows(&self, query: &ForecastQuery) -> Result<Vec<BlendedRow>> {
        let rows = self.compute(&query.range, query.ad_group_id.as_ref())?;
        Ok(blend_all(rows))
    }

    /// Summary over the query.
    ///
    /// # Errors
    /// Propagates validation and repository failures.
    pub fn summary(&self, query: &ForecastQuery) -> Result<ForecastSummary> {
        let rows = self.rows(query)?;
        Ok(summarize(query.range, &rows))
    }

    /// Rows and summary together.
    ///
    /// # Errors
    /// Propagates validation and repository failures.
    pub fn report(&self, query: &ForecastQuery) -> Result<ForecastReport> {
        let rows = self.rows(query)?;
        let summary = summarize(query.range, &rows);
        Ok(ForecastReport {
            range: query.range,
            ad_group_id: query.ad_group_id.clone(),
            model_name: self.model_name().to_string(),
            model_version: self.model_version(),
            rows,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forecast::projection::CalibrationWindow;
    use crate::domain::{
        AdGroup, AdSpendRecord, FixedConfidenceModel, Order, OrderId, OrderStatus, Platform,
        SpendSource,
    };
    use crate::domain::error::DomainError;
    use crate::port::outbound::{AdSpendRepository, OrderRepository};
    use crate::testkit::InMemoryStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn service(store: Arc<InMemoryStore>) -> ForecastService {
        let model = Arc::new(FixedConfidenceModel::try_new(Decimal::ONE).unwrap());
        let estimator = ProjectionEstimator::new(
            model,
            store.clone(),
            CalibrationWindow {
                maturation_days: 14,
                lookback_days: 30,
            },
        );
        ForecastService::new(
            Aggregator::new(store.clone(), store.clone()),
            estimator,
            store,
            31,
        )
        .with_today(Arc::new(|| NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()))
    }

    fn seed(store: &InMemoryStore) {
        store
            .upsert_ad_group(&AdGroup {
                id: AdGroupId::new("AG1"),
                name: "Winter sale".into(),
                platform: Platform::Facebook,
            })
            .unwrap();
        store
            .upsert_order(&Order {
                id: OrderId::new("o-1"),
                ad_group_id: AdGroupId::new("AG1"),
                order_date: date(10),
                revenue: dec!(1000000),
                profit: dec!(250000),
                status: OrderStatus::Confirmed,
            })
            .unwrap();
        store
            .upsert_order(&Order {
                id: OrderId::new("o-2"),
                ad_group_id: AdGroupId::new("AG1"),
                order_date: date(10),
                revenue: dec!(200000),
                profit: dec!(50000),
                status: OrderStatus::Pending,
            })
            .unwrap();
        store
            .upsert_spend(&AdSpendRecord {
                date: date(10),
                ad_group_id: AdGroupId::new("AG1"),
                spend: dec!(150000),
                source: SpendSource::Manual,
            })
            .unwrap();
    }

    #[test]
    fn report_reproduces_reference_example() {
        let store = Arc::new(InMemoryStore::default());
        seed(&store);
        let service = service(store);

        let query = ForecastQuery::new(
            DateRange::new(date(1), date(31)).unwrap(),
            Some(AdGroupId::new("AG1")),
        );
        let report = service.report(&query).unwrap();

        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.blended_revenue, dec!(1200000));
        assert_eq!(row.blended_roas, dec!(8));
        assert_eq!(report.summary.blended_revenue, dec!(1200000));
        assert_eq!(report.summary.blended_roas, dec!(8));
        assert_eq!(report.model_version, FixedConfidenceModel::VERSION);
    }

    #[test]
    fn unknown_ad_group_is_rejected() {
        let store = Arc::new(InMemoryStore::default());
        seed(&store);
        let service = service(store);

        let query = ForecastQuery::new(DateRange::single(date(10)), Some(AdGroupId::new("nope")));
        assert!(matches!(
            service.rows(&query),
            Err(Error::UnknownAdGroup(id)) if id == "nope"
        ));
    }

    #[test]
    fn over_long_range_is_rejected() {
        let service = service(Arc::new(InMemoryStore::default()));
        let range = DateRange::new(date(1), NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()).unwrap();
        assert!(matches!(
            service.summary(&ForecastQuery::new(range, None)),
            Err(Error::Domain(DomainError::RangeTooLong { .. }))
        ));
    }

    #[test]
    fn empty_store_gives_zero_summary() {
        let service = service(Arc::new(InMemoryStore::default()));
        let range = DateRange::single(date(5));
        let summary = service.summary(&ForecastQuery::new(range, None)).unwrap();
        assert_eq!(summary, ForecastSummary::empty(range));
    }
}
