//! Database model types for Diesel ORM.
//!
//! Money and ratios are stored as decimal TEXT so no precision is lost on the
//! way through SQLite; dates are `YYYY-MM-DD` TEXT and sort lexicographically.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{ad_groups, ad_spend, forecast_snapshots, orders};
use crate::domain::{
    AdGroup, AdGroupId, AdSpendRecord, DailyAdGroupForecastRow, ForecastSnapshot, Order, OrderId,
};
use crate::error::{Error, Result};

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::Parse(format!("{field}: {e}")))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| Error::Parse(format!("{field}: {e}")))
}

fn parse_count(field: &str, raw: i32) -> Result<u32> {
    u32::try_from(raw).map_err(|e| Error::Parse(format!("{field}: {e}")))
}

fn count_column(field: &str, count: u32) -> Result<i32> {
    i32::try_from(count).map_err(|e| Error::Parse(format!("{field}: {e}")))
}

/// Database row for an ad group.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = ad_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdGroupRow {
    pub id: String,
    pub name: String,
    pub platform: String,
}

impl From<&AdGroup> for AdGroupRow {
    fn from(group: &AdGroup) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name.clone(),
            platform: group.platform.as_str().to_string(),
        }
    }
}

impl TryFrom<AdGroupRow> for AdGroup {
    type Error = Error;

    fn try_from(row: AdGroupRow) -> Result<Self> {
        Ok(Self {
            id: AdGroupId::new(row.id),
            name: row.name,
            platform: row.platform.parse()?,
        })
    }
}

/// Database row for an order.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: String,
    pub ad_group_id: String,
    pub order_date: String,
    pub revenue: String,
    pub profit: String,
    pub status: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            ad_group_id: order.ad_group_id.to_string(),
            order_date: order.order_date.to_string(),
            revenue: order.revenue.to_string(),
            profit: order.profit.to_string(),
            status: order.status.as_str().to_string(),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = Error;

    fn try_from(row: OrderRow) -> Result<Self> {
        Ok(Self {
            order_date: parse_date("order_date", &row.order_date)?,
            revenue: parse_decimal("revenue", &row.revenue)?,
            profit: parse_decimal("profit", &row.profit)?,
            status: row.status.parse()?,
            id: OrderId::new(row.id),
            ad_group_id: AdGroupId::new(row.ad_group_id),
        })
    }
}

/// Database row for one day of ad spend.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = ad_spend)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdSpendRow {
    pub date: String,
    pub ad_group_id: String,
    pub spend: String,
    pub source: String,
}

impl From<&AdSpendRecord> for AdSpendRow {
    fn from(record: &AdSpendRecord) -> Self {
        Self {
            date: record.date.to_string(),
            ad_group_id: record.ad_group_id.to_string(),
            spend: record.spend.to_string(),
            source: record.source.as_str().to_string(),
        }
    }
}

impl TryFrom<AdSpendRow> for AdSpendRecord {
    type Error = Error;

    fn try_from(row: AdSpendRow) -> Result<Self> {
        Ok(Self {
            date: parse_date("date", &row.date)?,
            spend: parse_decimal("spend", &row.spend)?,
            source: row.source.parse()?,
            ad_group_id: AdGroupId::new(row.ad_group_id),
        })
    }
}

/// Database row for a forecast snapshot.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = forecast_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotRow {
    pub date: String,
    pub ad_group_id: String,
    pub matured_revenue: String,
    pub matured_profit: String,
    pub matured_order_count: i32,
    pub projected_revenue: String,
    pub projected_profit: String,
    pub projected_order_count: i32,
    pub spend: String,
    pub confidence: String,
    pub calibration_error: String,
    pub model_version: i32,
    pub computed_at: String,
}

impl SnapshotRow {
    /// # Errors
    /// Returns [`Error::Parse`] when a count does not fit the column.
    pub fn new(row: &DailyAdGroupForecastRow, computed_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            date: row.date.to_string(),
            ad_group_id: row.ad_group_id.to_string(),
            matured_revenue: row.matured_revenue.to_string(),
            matured_profit: row.matured_profit.to_string(),
            matured_order_count: count_column("matured_order_count", row.matured_order_count)?,
            projected_revenue: row.projected_revenue.to_string(),
            projected_profit: row.projected_profit.to_string(),
            projected_order_count: count_column("projected_order_count", row.projected_order_count)?,
            spend: row.spend.to_string(),
            confidence: row.confidence.to_string(),
            calibration_error: row.calibration_error.to_string(),
            model_version: count_column("model_version", row.model_version)?,
            computed_at: computed_at.to_rfc3339(),
        })
    }

    /// Decode the stored forecast figures, ignoring `computed_at`.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] for malformed columns.
    pub fn forecast_row(&self) -> Result<DailyAdGroupForecastRow> {
        Ok(DailyAdGroupForecastRow {
            date: parse_date("date", &self.date)?,
            ad_group_id: AdGroupId::new(self.ad_group_id.clone()),
            matured_revenue: parse_decimal("matured_revenue", &self.matured_revenue)?,
            matured_profit: parse_decimal("matured_profit", &self.matured_profit)?,
            matured_order_count: parse_count("matured_order_count", self.matured_order_count)?,
            projected_revenue: parse_decimal("projected_revenue", &self.projected_revenue)?,
            projected_profit: parse_decimal("projected_profit", &self.projected_profit)?,
            projected_order_count: parse_count(
                "projected_order_count",
                self.projected_order_count,
            )?,
            spend: parse_decimal("spend", &self.spend)?,
            confidence: parse_decimal("confidence", &self.confidence)?,
            calibration_error: parse_decimal("calibration_error", &self.calibration_error)?,
            model_version: parse_count("model_version", self.model_version)?,
        })
    }
}

impl TryFrom<SnapshotRow> for ForecastSnapshot {
    type Error = Error;

    fn try_from(row: SnapshotRow) -> Result<Self> {
        let computed_at = DateTime::parse_from_rfc3339(&row.computed_at)
            .map_err(|e| Error::Parse(format!("computed_at: {e}")))?
            .with_timezone(&Utc);
        Ok(Self {
            row: row.forecast_row()?,
            computed_at,
        })
    }
}
