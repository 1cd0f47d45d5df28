//! Order storage port.
//!
//! Orders are owned by the order-management side of the business; the
//! forecast only aggregates over them.

use crate::domain::{AdGroupId, DateRange, Order};
use crate::error::Result;

pub trait OrderRepository: Send + Sync {
    /// Orders placed within `range`, optionally restricted to one ad group.
    fn orders_in_range(&self, range: &DateRange, ad_group: Option<&AdGroupId>)
        -> Result<Vec<Order>>;

    /// Insert or replace an order by id.
    fn upsert_order(&self, order: &Order) -> Result<()>;
}
