//! SQLite forecast snapshot storage.
//!
//! The read-compare-write in [`SqliteSnapshotRepository::upsert_snapshot`]
//! runs inside an immediate transaction so concurrent runs (scheduler and an
//! on-demand request) cannot interleave on the same key.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::trace;

use super::database::model::SnapshotRow;
use super::database::schema::forecast_snapshots;
use super::database::DbPool;
use crate::domain::snapshot::resolve_upsert;
use crate::domain::{
    AdGroupId, DailyAdGroupForecastRow, DateRange, ForecastSnapshot, SnapshotOutcome,
};
use crate::error::{Error, Result};
use crate::port::outbound::SnapshotRepository;

/// SQLite-backed [`SnapshotRepository`].
pub struct SqliteSnapshotRepository {
    pool: DbPool,
}

impl SqliteSnapshotRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn upsert_snapshot(
        &self,
        row: &DailyAdGroupForecastRow,
        computed_at: DateTime<Utc>,
    ) -> Result<SnapshotOutcome> {
        let incoming = SnapshotRow::new(row, computed_at)?;
        let mut conn = self.pool.get()?;

        conn.immediate_transaction::<_, Error, _>(|conn| {
            let existing: Option<SnapshotRow> = forecast_snapshots::table
                .find((incoming.date.as_str(), incoming.ad_group_id.as_str()))
                .select(SnapshotRow::as_select())
                .first(conn)
                .optional()?;
            let existing = existing.map(|r| r.forecast_row()).transpose()?;

            let outcome = resolve_upsert(existing.as_ref(), row);
            if matches!(outcome, SnapshotOutcome::Inserted | SnapshotOutcome::Updated) {
                diesel::replace_into(forecast_snapshots::table)
                    .values(&incoming)
                    .execute(conn)?;
            }
            trace!(date = %row.date, ad_group = %row.ad_group_id, ?outcome, "Snapshot upsert");
            Ok(outcome)
        })
    }

    fn snapshots_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<ForecastSnapshot>> {
        let mut conn = self.pool.get()?;
        let mut query = forecast_snapshots::table
            .filter(forecast_snapshots::date.ge(range.from().to_string()))
            .filter(forecast_snapshots::date.le(range.to().to_string()))
            .into_boxed();
        if let Some(id) = ad_group {
            query = query.filter(forecast_snapshots::ad_group_id.eq(id.as_str().to_string()));
        }

        query
            .order((
                forecast_snapshots::date.asc(),
                forecast_snapshots::ad_group_id.asc(),
            ))
            .select(SnapshotRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(ForecastSnapshot::try_from)
            .collect()
    }
}
