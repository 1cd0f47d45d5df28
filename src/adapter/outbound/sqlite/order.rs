//! SQLite order storage.

use diesel::prelude::*;

use super::database::model::OrderRow;
use super::database::schema::orders;
use super::database::DbPool;
use crate::domain::{AdGroupId, DateRange, Order};
use crate::error::Result;
use crate::port::outbound::OrderRepository;

/// SQLite-backed [`OrderRepository`].
pub struct SqliteOrderRepository {
    pool: DbPool,
}

impl SqliteOrderRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for SqliteOrderRepository {
    fn orders_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<Order>> {
        let mut conn = self.pool.get()?;
        let mut query = orders::table
            .filter(orders::order_date.ge(range.from().to_string()))
            .filter(orders::order_date.le(range.to().to_string()))
            .into_boxed();
        if let Some(id) = ad_group {
            query = query.filter(orders::ad_group_id.eq(id.as_str().to_string()));
        }

        query
            .order((orders::order_date.asc(), orders::id.asc()))
            .select(OrderRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    fn upsert_order(&self, order: &Order) -> Result<()> {
        let mut conn = self.pool.get()?;
        diesel::replace_into(orders::table)
            .values(OrderRow::from(order))
            .execute(&mut conn)?;
        Ok(())
    }
}
