//! Matured/projected aggregation.
//!
//! Groups orders by `(date, ad group)` into matured and pending baselines and
//! joins the day's ad spend onto the same key.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{AdGroupId, AdSpendRecord, DateRange, Maturity, Order};
use crate::error::Result;
use crate::port::outbound::{AdSpendRepository, OrderRepository};

/// Key every forecast figure is grouped by.
pub type ForecastKey = (NaiveDate, AdGroupId);

/// Unscaled figures for one key, before the projection model runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    pub matured_revenue: Decimal,
    pub matured_profit: Decimal,
    pub matured_order_count: u32,
    pub pending_revenue: Decimal,
    pub pending_profit: Decimal,
    pub pending_order_count: u32,
    pub spend: Decimal,
}

/// Group orders and spend into baselines.
///
/// Orders and spend outside `range` or not matching `ad_group` are ignored.
/// A key that has spend but no orders still gets a baseline with zero
/// revenue; a key with orders but no spend gets zero spend.
#[must_use]
pub fn aggregate(
    orders: &[Order],
    spend: &[AdSpendRecord],
    range: &DateRange,
    ad_group: Option<&AdGroupId>,
) -> BTreeMap<ForecastKey, Baseline> {
    let in_scope = |date: NaiveDate, id: &AdGroupId| {
        range.contains(date) && ad_group.map_or(true, |wanted| wanted == id)
    };

    let mut baselines: BTreeMap<ForecastKey, Baseline> = BTreeMap::new();

    for order in orders {
        if !in_scope(order.order_date, &order.ad_group_id) {
            continue;
        }
        let maturity = order.maturity();
        if maturity == Maturity::Excluded {
            continue;
        }
        let entry = baselines
            .entry((order.order_date, order.ad_group_id.clone()))
            .or_default();
        match maturity {
            Maturity::Matured => {
                entry.matured_revenue += order.revenue;
                entry.matured_profit += order.profit;
                entry.matured_order_count += 1;
            }
            Maturity::Projected => {
                entry.pending_revenue += order.revenue;
                entry.pending_profit += order.profit;
                entry.pending_order_count += 1;
            }
            Maturity::Excluded => {}
        }
    }

    for record in spend {
        if !in_scope(record.date, &record.ad_group_id) {
            continue;
        }
        baselines
            .entry((record.date, record.ad_group_id.clone()))
            .or_default()
            .spend += record.spend;
    }

    baselines
}

/// Loads orders and spend from their repositories and aggregates them.
pub struct Aggregator {
    orders: Arc<dyn OrderRepository>,
    spend: Arc<dyn AdSpendRepository>,
}

impl Aggregator {
    pub fn new(orders: Arc<dyn OrderRepository>, spend: Arc<dyn AdSpendRepository>) -> Self {
        Self { orders, spend }
    }

    /// Baselines for every key in `range`.
    ///
    /// # Errors
    /// Propagates repository failures. Missing data is not an error.
    pub fn load(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<BTreeMap<ForecastKey, Baseline>> {
        let orders = self.orders.orders_in_range(range, ad_group)?;
        let spend = self.spend.spend_in_range(range, ad_group)?;
        let baselines = aggregate(&orders, &spend, range, ad_group);

        debug!(
            from = %range.from(),
            to = %range.to(),
            orders = orders.len(),
            spend_records = spend.len(),
            keys = baselines.len(),
            "Aggregated forecast baselines"
        );

        Ok(baselines)
    }

    /// Matured revenue per key, ignoring spend and pending orders.
    ///
    /// Used to compare historical projections with realized outcomes.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub fn matured_revenue(&self, range: &DateRange) -> Result<BTreeMap<ForecastKey, Decimal>> {
        let orders = self.orders.orders_in_range(range, None)?;
        Ok(aggregate(&orders, &[], range, None)
            .into_iter()
            .map(|(key, baseline)| (key, baseline.matured_revenue))
            .collect())
    }
}
