//! Forecast rows: matured and projected figures for one ad group on one day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::AdGroupId;

/// `numerator / denominator`, or zero when the denominator is zero.
///
/// Ratios in reports are never infinite or undefined: an ad group that spent
/// nothing has a ROAS of zero.
#[must_use]
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Forecast for one `(date, ad_group_id)` key.
///
/// Projected figures are already scaled by `confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAdGroupForecastRow {
    pub date: NaiveDate,
    pub ad_group_id: AdGroupId,
    pub matured_revenue: Decimal,
    pub matured_profit: Decimal,
    pub matured_order_count: u32,
    pub projected_revenue: Decimal,
    pub projected_profit: Decimal,
    pub projected_order_count: u32,
    pub spend: Decimal,
    /// Share of pending revenue expected to mature, in `[0, 1]`.
    pub confidence: Decimal,
    /// Historical deviation of projections from outcomes, in `[0, 1]`.
    pub calibration_error: Decimal,
    pub model_version: u32,
}

impl DailyAdGroupForecastRow {
    /// Empty row for a key; every figure is zero.
    #[must_use]
    pub fn empty(date: NaiveDate, ad_group_id: AdGroupId, model_version: u32) -> Self {
        Self {
            date,
            ad_group_id,
            matured_revenue: Decimal::ZERO,
            matured_profit: Decimal::ZERO,
            matured_order_count: 0,
            projected_revenue: Decimal::ZERO,
            projected_profit: Decimal::ZERO,
            projected_order_count: 0,
            spend: Decimal::ZERO,
            confidence: Decimal::ZERO,
            calibration_error: Decimal::ZERO,
            model_version,
        }
    }

    #[must_use]
    pub fn blended_revenue(&self) -> Decimal {
        self.matured_revenue + self.projected_revenue
    }

    #[must_use]
    pub fn blended_profit(&self) -> Decimal {
        self.matured_profit + self.projected_profit
    }

    #[must_use]
    pub fn blended_order_count(&self) -> u32 {
        self.matured_order_count + self.projected_order_count
    }

    /// Blended revenue over spend; zero when nothing was spent.
    #[must_use]
    pub fn blended_roas(&self) -> Decimal {
        ratio(self.blended_revenue(), self.spend)
    }

    /// Blended profit over blended revenue; zero without revenue.
    #[must_use]
    pub fn blended_margin(&self) -> Decimal {
        ratio(self.blended_profit(), self.blended_revenue())
    }

    /// Blended profit after ad spend.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.blended_profit() - self.spend
    }
}

/// A forecast row together with its blended figures, as served to reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendedRow {
    #[serde(flatten)]
    pub row: DailyAdGroupForecastRow,
    pub blended_revenue: Decimal,
    pub blended_profit: Decimal,
    pub blended_order_count: u32,
    pub blended_roas: Decimal,
    pub blended_margin: Decimal,
    pub net_profit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row() -> DailyAdGroupForecastRow {
        let mut row = DailyAdGroupForecastRow::empty(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            AdGroupId::new("AG1"),
            2,
        );
        row.matured_revenue = dec!(1000000);
        row.projected_revenue = dec!(200000);
        row.matured_profit = dec!(300000);
        row.projected_profit = dec!(60000);
        row.spend = dec!(150000);
        row
    }

    #[test]
    fn blended_figures_match_reference_example() {
        let row = row();
        assert_eq!(row.blended_revenue(), dec!(1200000));
        assert_eq!(row.blended_roas(), dec!(8));
        assert_eq!(row.blended_profit(), dec!(360000));
        assert_eq!(row.blended_margin(), dec!(0.3));
        assert_eq!(row.net_profit(), dec!(210000));
    }

    #[test]
    fn zero_spend_gives_zero_roas() {
        let mut row = row();
        row.spend = Decimal::ZERO;
        row.matured_revenue = dec!(500000);
        row.projected_revenue = Decimal::ZERO;
        assert_eq!(row.blended_roas(), Decimal::ZERO);
    }

    #[test]
    fn ratio_of_zero_denominator_is_zero() {
        assert_eq!(ratio(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio(dec!(0), dec!(5)), Decimal::ZERO);
        assert_eq!(ratio(dec!(3), dec!(2)), dec!(1.5));
    }
}
