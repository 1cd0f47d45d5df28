//! Blender: matured + projected into report figures.

use crate::domain::{BlendedRow, DailyAdGroupForecastRow, DateRange, ForecastSummary};

/// Attach blended figures to one row.
#[must_use]
pub fn blend(row: DailyAdGroupForecastRow) -> BlendedRow {
    BlendedRow {
        blended_revenue: row.blended_revenue(),
        blended_profit: row.blended_profit(),
        blended_order_count: row.blended_order_count(),
        blended_roas: row.blended_roas(),
        blended_margin: row.blended_margin(),
        net_profit: row.net_profit(),
        row,
    }
}

#[must_use]
pub fn blend_all(rows: Vec<DailyAdGroupForecastRow>) -> Vec<BlendedRow> {
    rows.into_iter().map(blend).collect()
}

/// Sum rows over `range` and derive ROAS and margin from the totals.
#[must_use]
pub fn summarize(range: DateRange, rows: &[BlendedRow]) -> ForecastSummary {
    let mut summary = ForecastSummary::empty(range);
    for row in rows {
        summary.accumulate(row);
    }
    summary.finish();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdGroupId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(group: &str, matured: Decimal, projected: Decimal, spend: Decimal) -> DailyAdGroupForecastRow {
        let mut row = DailyAdGroupForecastRow::empty(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            AdGroupId::new(group),
            2,
        );
        row.matured_revenue = matured;
        row.projected_revenue = projected;
        row.matured_profit = matured / dec!(5);
        row.projected_profit = projected / dec!(5);
        row.spend = spend;
        row
    }

    fn range() -> DateRange {
        DateRange::single(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
    }

    #[test]
    fn blend_matches_reference_example() {
        let blended = blend(row("AG1", dec!(1000000), dec!(200000), dec!(150000)));
        assert_eq!(blended.blended_revenue, dec!(1200000));
        assert_eq!(blended.blended_roas, dec!(8));
    }

    #[test]
    fn blend_with_zero_spend_has_zero_roas() {
        let blended = blend(row("AG1", dec!(500000), Decimal::ZERO, Decimal::ZERO));
        assert_eq!(blended.blended_roas, Decimal::ZERO);
        assert_eq!(blended.blended_revenue, dec!(500000));
    }

    #[test]
    fn summary_recomputes_ratios_from_totals() {
        // Per-row ROAS of 10 and 1 would average to 5.5; totals give 2.
        let rows = blend_all(vec![
            row("AG1", dec!(100), Decimal::ZERO, dec!(10)),
            row("AG2", dec!(100), Decimal::ZERO, dec!(100)),
        ]);
        let summary = summarize(range(), &rows);
        assert_eq!(summary.blended_revenue, dec!(200));
        assert_eq!(summary.spend, dec!(110));
        assert_eq!(summary.blended_roas, dec!(200) / dec!(110));
        assert_ne!(summary.blended_roas, dec!(5.5));
    }

    #[test]
    fn summary_totals_equal_row_sums() {
        let rows = blend_all(vec![
            row("AG1", dec!(1000000), dec!(200000), dec!(150000)),
            row("AG2", dec!(0), dec!(0), dec!(25000)),
            row("AG3", dec!(500000), dec!(12345.67), dec!(0)),
        ]);
        let summary = summarize(range(), &rows);

        let revenue: Decimal = rows.iter().map(|r| r.blended_revenue).sum();
        let profit: Decimal = rows.iter().map(|r| r.blended_profit).sum();
        let spend: Decimal = rows.iter().map(|r| r.row.spend).sum();

        assert_eq!(summary.blended_revenue, revenue);
        assert_eq!(summary.blended_profit, profit);
        assert_eq!(summary.spend, spend);
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.net_profit, profit - spend);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = summarize(range(), &[]);
        assert_eq!(summary, ForecastSummary::empty(range()));
    }
}
