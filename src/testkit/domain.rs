//! Builders for domain primitives used across tests.
//!
//! Keep test bodies focused on assertions rather than struct literals.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{
    AdGroup, AdGroupId, AdSpendRecord, Order, OrderId, OrderStatus, Platform, SpendSource,
};

/// A day in January 2024.
pub fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default()
}

pub fn ad_group(id: &str) -> AdGroup {
    AdGroup {
        id: AdGroupId::new(id),
        name: format!("Ad group {id}"),
        platform: Platform::Facebook,
    }
}

pub fn order(
    id: &str,
    ad_group: &str,
    date: NaiveDate,
    revenue: Decimal,
    profit: Decimal,
    status: OrderStatus,
) -> Order {
    Order {
        id: OrderId::new(id),
        ad_group_id: AdGroupId::new(ad_group),
        order_date: date,
        revenue,
        profit,
        status,
    }
}

pub fn spend(ad_group: &str, date: NaiveDate, amount: Decimal) -> AdSpendRecord {
    AdSpendRecord {
        date,
        ad_group_id: AdGroupId::new(ad_group),
        spend: amount,
        source: SpendSource::Manual,
    }
}
