//! SQLite ad group registry.

use diesel::prelude::*;

use super::database::model::AdGroupRow;
use super::database::schema::ad_groups;
use super::database::DbPool;
use crate::domain::{AdGroup, AdGroupId};
use crate::error::Result;
use crate::port::outbound::AdGroupRepository;

/// SQLite-backed [`AdGroupRepository`].
pub struct SqliteAdGroupRepository {
    pool: DbPool,
}

impl SqliteAdGroupRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AdGroupRepository for SqliteAdGroupRepository {
    fn find_ad_group(&self, id: &AdGroupId) -> Result<Option<AdGroup>> {
        let mut conn = self.pool.get()?;
        let row: Option<AdGroupRow> = ad_groups::table
            .find(id.as_str())
            .select(AdGroupRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(AdGroup::try_from).transpose()
    }

    fn list_ad_groups(&self) -> Result<Vec<AdGroup>> {
        let mut conn = self.pool.get()?;
        ad_groups::table
            .order(ad_groups::id.asc())
            .select(AdGroupRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(AdGroup::try_from)
            .collect()
    }

    fn upsert_ad_group(&self, group: &AdGroup) -> Result<()> {
        let mut conn = self.pool.get()?;
        diesel::replace_into(ad_groups::table)
            .values(AdGroupRow::from(group))
            .execute(&mut conn)?;
        Ok(())
    }
}
