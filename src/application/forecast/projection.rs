//! Projection estimator.
//!
//! Turns baselines into forecast rows by scaling pending figures with the
//! active [`ProjectionModel`], and feeds the model its calibration history:
//! past snapshots whose orders have since had time to mature are compared
//! with what actually matured.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use super::aggregator::{Aggregator, Baseline, ForecastKey};
use crate::domain::{
    AdGroupId, Calibration, DailyAdGroupForecastRow, DateRange, ProjectionInput, ProjectionModel,
};
use crate::error::Result;
use crate::port::outbound::SnapshotRepository;

/// Calibration window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationWindow {
    /// Days after which a pending order is considered settled either way.
    pub maturation_days: u32,
    /// How many settled days of history to compare.
    pub lookback_days: u32,
}

impl CalibrationWindow {
    /// The settled history window relative to `today`, if any.
    #[must_use]
    pub fn range(&self, today: NaiveDate) -> Option<DateRange> {
        if self.lookback_days == 0 {
            return None;
        }
        Some(DateRange::trailing(self.settled_through(today), self.lookback_days))
    }

    /// Last day whose pending orders have had time to settle.
    #[must_use]
    pub fn settled_through(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(i64::from(self.maturation_days))
    }
}

pub struct ProjectionEstimator {
    model: Arc<dyn ProjectionModel>,
    snapshots: Arc<dyn SnapshotRepository>,
    window: CalibrationWindow,
}

impl ProjectionEstimator {
    pub fn new(
        model: Arc<dyn ProjectionModel>,
        snapshots: Arc<dyn SnapshotRepository>,
        window: CalibrationWindow,
    ) -> Self {
        Self {
            model,
            snapshots,
            window,
        }
    }

    #[must_use]
    pub fn window(&self) -> CalibrationWindow {
        self.window
    }

    #[must_use]
    pub fn model(&self) -> &dyn ProjectionModel {
        self.model.as_ref()
    }

    /// Calibration per ad group from settled history.
    ///
    /// Returns an empty map when the model does not use calibration or the
    /// window is disabled; ad groups without history get no entry.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub fn calibrate(
        &self,
        aggregator: &Aggregator,
        today: NaiveDate,
        ad_groups: &BTreeSet<AdGroupId>,
    ) -> Result<HashMap<AdGroupId, Calibration>> {
        if !self.model.uses_calibration() || ad_groups.is_empty() {
            return Ok(HashMap::new());
        }
        let Some(window) = self.window.range(today) else {
            return Ok(HashMap::new());
        };

        let snapshots = self.snapshots.snapshots_in_range(&window, None)?;
        if snapshots.is_empty() {
            return Ok(HashMap::new());
        }
        let matured = aggregator.matured_revenue(&window)?;

        let mut pairs: BTreeMap<AdGroupId, Vec<(Decimal, Decimal)>> = BTreeMap::new();
        for snapshot in snapshots {
            let row = &snapshot.row;
            if !ad_groups.contains(&row.ad_group_id) {
                continue;
            }
            let key: ForecastKey = (row.date, row.ad_group_id.clone());
            let actual = matured.get(&key).copied().unwrap_or(Decimal::ZERO);
            pairs
                .entry(row.ad_group_id.clone())
                .or_default()
                .push((row.blended_revenue(), actual));
        }

        let calibrations: HashMap<AdGroupId, Calibration> = pairs
            .into_iter()
            .map(|(id, samples)| (id, Calibration::from_pairs(samples)))
            .collect();

        debug!(
            from = %window.from(),
            to = %window.to(),
            ad_groups = calibrations.len(),
            "Computed projection calibration"
        );

        Ok(calibrations)
    }

    /// Apply the model to each baseline.
    #[must_use]
    pub fn project(
        &self,
        baselines: BTreeMap<ForecastKey, Baseline>,
        calibrations: &HashMap<AdGroupId, Calibration>,
    ) -> Vec<DailyAdGroupForecastRow> {
        let version = self.model.version();

        baselines
            .into_iter()
            .map(|((date, ad_group_id), baseline)| {
                let calibration = calibrations.get(&ad_group_id).copied().unwrap_or_default();
                let projection = self.model.estimate(&ProjectionInput {
                    date,
                    ad_group_id: &ad_group_id,
                    calibration,
                });

                DailyAdGroupForecastRow {
                    date,
                    matured_revenue: baseline.matured_revenue,
                    matured_profit: baseline.matured_profit,
                    matured_order_count: baseline.matured_order_count,
                    projected_revenue: (baseline.pending_revenue * projection.confidence)
                        .round_dp(2),
                    projected_profit: (baseline.pending_profit * projection.confidence)
                        .round_dp(2),
                    projected_order_count: baseline.pending_order_count,
                    spend: baseline.spend,
                    confidence: projection.confidence,
                    calibration_error: projection.calibration_error,
                    model_version: version,
                    ad_group_id,
                }
            })
            .collect()
    }
}
