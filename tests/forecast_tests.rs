mod harness;

use profitcast::application::forecast::ForecastQuery;
use profitcast::domain::{AdGroupId, DateRange, OrderStatus};
use profitcast::error::Error;
use profitcast::port::outbound::{AdGroupRepository, AdSpendRepository, OrderRepository};
use profitcast::testkit::domain::{ad_group, jan, order, spend};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use harness::app::{fixed_config, TestApp};

fn seed_reference_day(app: &TestApp) {
    let repos = &app.repos;
    repos.ad_groups.upsert_ad_group(&ad_group("AG1")).unwrap();
    repos
        .orders
        .upsert_order(&order("o1", "AG1", jan(10), dec!(600000), dec!(180000), OrderStatus::Delivered))
        .unwrap();
    repos
        .orders
        .upsert_order(&order("o2", "AG1", jan(10), dec!(400000), dec!(120000), OrderStatus::Confirmed))
        .unwrap();
    repos
        .orders
        .upsert_order(&order("o3", "AG1", jan(10), dec!(250000), dec!(75000), OrderStatus::Pending))
        .unwrap();
    repos
        .orders
        .upsert_order(&order("o4", "AG1", jan(10), dec!(90000), dec!(20000), OrderStatus::Cancelled))
        .unwrap();
    repos.spend.upsert_spend(&spend("AG1", jan(10), dec!(150000))).unwrap();
}

#[test]
fn blended_roas_over_sqlite_matches_reference_example() {
    let app = TestApp::new("forecast-reference", &fixed_config(), jan(12));
    seed_reference_day(&app);

    let rows = app
        .services
        .forecast
        .rows(&ForecastQuery::new(DateRange::single(jan(10)), None))
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.row.matured_revenue, dec!(1000000));
    assert_eq!(row.row.projected_revenue, dec!(200000));
    assert_eq!(row.row.matured_order_count, 2);
    assert_eq!(row.row.projected_order_count, 1);
    assert_eq!(row.blended_revenue, dec!(1200000));
    assert_eq!(row.blended_roas, dec!(8));
    assert_eq!(row.row.confidence, dec!(0.8));
    assert_eq!(row.row.model_version, 1);
}

#[test]
fn spend_without_orders_yields_a_zero_revenue_row() {
    let app = TestApp::new("forecast-spend-only", &fixed_config(), jan(12));
    app.repos.ad_groups.upsert_ad_group(&ad_group("AG2")).unwrap();
    app.repos.spend.upsert_spend(&spend("AG2", jan(11), dec!(5000))).unwrap();

    let rows = app
        .services
        .forecast
        .rows(&ForecastQuery::new(DateRange::new(jan(10), jan(11)).unwrap(), None))
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row.date, jan(11));
    assert_eq!(rows[0].blended_revenue, Decimal::ZERO);
    assert_eq!(rows[0].blended_roas, Decimal::ZERO);
    assert_eq!(rows[0].net_profit, dec!(-5000));
}

#[test]
fn summary_recomputes_ratios_from_totals() {
    let app = TestApp::new("forecast-summary", &fixed_config(), jan(12));
    seed_reference_day(&app);
    app.repos.ad_groups.upsert_ad_group(&ad_group("AG2")).unwrap();
    app.repos
        .orders
        .upsert_order(&order("o5", "AG2", jan(11), dec!(100000), dec!(10000), OrderStatus::Delivered))
        .unwrap();
    app.repos.spend.upsert_spend(&spend("AG2", jan(11), dec!(100000))).unwrap();

    let summary = app
        .services
        .forecast
        .summary(&ForecastQuery::new(DateRange::new(jan(10), jan(11)).unwrap(), None))
        .unwrap();

    assert_eq!(summary.row_count, 2);
    assert_eq!(summary.blended_revenue, dec!(1300000));
    assert_eq!(summary.spend, dec!(250000));
    // 1_300_000 / 250_000, not the mean of 8 and 1
    assert_eq!(summary.blended_roas, dec!(5.2));
}

#[test]
fn ad_group_filter_limits_rows() {
    let app = TestApp::new("forecast-filter", &fixed_config(), jan(12));
    seed_reference_day(&app);
    app.repos.ad_groups.upsert_ad_group(&ad_group("AG2")).unwrap();
    app.repos.spend.upsert_spend(&spend("AG2", jan(10), dec!(1))).unwrap();

    let rows = app
        .services
        .forecast
        .rows(&ForecastQuery::new(
            DateRange::single(jan(10)),
            Some(AdGroupId::new("AG2")),
        ))
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row.ad_group_id, AdGroupId::new("AG2"));
}

#[test]
fn unknown_ad_group_filter_is_rejected() {
    let app = TestApp::new("forecast-unknown", &fixed_config(), jan(12));
    let err = app
        .services
        .forecast
        .rows(&ForecastQuery::new(
            DateRange::single(jan(10)),
            Some(AdGroupId::new("missing")),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAdGroup(_)));
}

#[test]
fn range_longer_than_limit_is_rejected() {
    let mut config = fixed_config();
    config.max_range_days = 7;
    let app = TestApp::new("forecast-long", &config, jan(31));

    let err = app
        .services
        .forecast
        .rows(&ForecastQuery::new(DateRange::new(jan(1), jan(31)).unwrap(), None))
        .unwrap_err();
    assert!(matches!(err, Error::Domain(_)));
}
