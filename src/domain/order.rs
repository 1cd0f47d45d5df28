//! Orders as seen by the forecast: revenue, profit and a maturation state.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AdGroupId, OrderId};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
    Returned,
}

/// How an order's figures enter the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maturity {
    /// Outcome confirmed; revenue counts as realized.
    Matured,
    /// Still in flight; revenue is scaled by the projection model.
    Projected,
    /// Cancelled or returned; contributes nothing.
    Excluded,
}

impl OrderStatus {
    #[must_use]
    pub const fn maturity(self) -> Maturity {
        match self {
            Self::Confirmed | Self::Delivered => Maturity::Matured,
            Self::Pending => Maturity::Projected,
            Self::Cancelled | Self::Returned => Maturity::Excluded,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            _ => Err(DomainError::UnknownVariant {
                kind: "order status",
                value: s.to_string(),
            }),
        }
    }
}

/// An order attributed to an ad group on the day it was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub ad_group_id: AdGroupId,
    pub order_date: NaiveDate,
    pub revenue: Decimal,
    /// Gross profit; may be negative for loss-making orders.
    pub profit: Decimal,
    pub status: OrderStatus,
}

impl Order {
    #[must_use]
    pub fn maturity(&self) -> Maturity {
        self.status.maturity()
    }

    /// # Errors
    /// Returns [`DomainError::NegativeRevenue`] for negative revenue.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.revenue < Decimal::ZERO {
            return Err(DomainError::NegativeRevenue {
                revenue: self.revenue,
            });
        }
        Ok(())
    }
}
