//! Range-level totals over forecast rows.

use rust_decimal::Decimal;
use serde::Serialize;

use super::forecast::{ratio, BlendedRow};
use super::id::AdGroupId;
use super::range::DateRange;

/// Totals across a set of forecast rows.
///
/// Ratios are recomputed from the totals, never averaged across rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub range: DateRange,
    pub row_count: usize,
    pub matured_revenue: Decimal,
    pub matured_profit: Decimal,
    pub matured_order_count: u64,
    pub projected_revenue: Decimal,
    pub projected_profit: Decimal,
    pub projected_order_count: u64,
    pub blended_revenue: Decimal,
    pub blended_profit: Decimal,
    pub spend: Decimal,
    pub blended_roas: Decimal,
    pub blended_margin: Decimal,
    pub net_profit: Decimal,
}

impl ForecastSummary {
    /// All-zero summary for a range with no rows.
    #[must_use]
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            row_count: 0,
            matured_revenue: Decimal::ZERO,
            matured_profit: Decimal::ZERO,
            matured_order_count: 0,
            projected_revenue: Decimal::ZERO,
            projected_profit: Decimal::ZERO,
            projected_order_count: 0,
            blended_revenue: Decimal::ZERO,
            blended_profit: Decimal::ZERO,
            spend: Decimal::ZERO,
            blended_roas: Decimal::ZERO,
            blended_margin: Decimal::ZERO,
            net_profit: Decimal::ZERO,
        }
    }

    /// Add one row's figures to the running totals.
    ///
    /// Call [`ForecastSummary::finish`] once all rows are in.
    pub fn accumulate(&mut self, blended: &BlendedRow) {
        let row = &blended.row;
        self.row_count += 1;
        self.matured_revenue += row.matured_revenue;
        self.matured_profit += row.matured_profit;
        self.matured_order_count += u64::from(row.matured_order_count);
        self.projected_revenue += row.projected_revenue;
        self.projected_profit += row.projected_profit;
        self.projected_order_count += u64::from(row.projected_order_count);
        self.blended_revenue += blended.blended_revenue;
        self.blended_profit += blended.blended_profit;
        self.spend += row.spend;
    }

    /// Derive ratios from the accumulated totals.
    pub fn finish(&mut self) {
        self.blended_roas = ratio(self.blended_revenue, self.spend);
        self.blended_margin = ratio(self.blended_profit, self.blended_revenue);
        self.net_profit = self.blended_profit - self.spend;
    }
}

/// Rows plus their summary for one query; the payload served to reports and
/// pushed to spreadsheet sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub range: DateRange,
    pub ad_group_id: Option<AdGroupId>,
    pub model_name: String,
    pub model_version: u32,
    pub rows: Vec<BlendedRow>,
    pub summary: ForecastSummary,
}
