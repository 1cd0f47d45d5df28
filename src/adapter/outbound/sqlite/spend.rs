//! SQLite ad spend storage.

use diesel::prelude::*;

use super::database::model::AdSpendRow;
use super::database::schema::ad_spend;
use super::database::DbPool;
use crate::domain::{AdGroupId, AdSpendRecord, DateRange};
use crate::error::Result;
use crate::port::outbound::AdSpendRepository;

/// SQLite-backed [`AdSpendRepository`]. One row per `(date, ad_group_id)`.
pub struct SqliteSpendRepository {
    pool: DbPool,
}

impl SqliteSpendRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AdSpendRepository for SqliteSpendRepository {
    fn spend_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<AdSpendRecord>> {
        let mut conn = self.pool.get()?;
        let mut query = ad_spend::table
            .filter(ad_spend::date.ge(range.from().to_string()))
            .filter(ad_spend::date.le(range.to().to_string()))
            .into_boxed();
        if let Some(id) = ad_group {
            query = query.filter(ad_spend::ad_group_id.eq(id.as_str().to_string()));
        }

        query
            .order((ad_spend::date.asc(), ad_spend::ad_group_id.asc()))
            .select(AdSpendRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(AdSpendRecord::try_from)
            .collect()
    }

    fn upsert_spend(&self, record: &AdSpendRecord) -> Result<()> {
        let mut conn = self.pool.get()?;
        diesel::replace_into(ad_spend::table)
            .values(AdSpendRow::from(record))
            .execute(&mut conn)?;
        Ok(())
    }
}
