//! Forecast snapshot storage port.

use chrono::{DateTime, Utc};

use crate::domain::{AdGroupId, DailyAdGroupForecastRow, DateRange, ForecastSnapshot, SnapshotOutcome};
use crate::error::Result;

pub trait SnapshotRepository: Send + Sync {
    /// Upsert one row keyed by `(date, ad_group_id)`.
    ///
    /// Implementations must apply [`resolve_upsert`] atomically against the
    /// stored row and only write when the outcome is `Inserted` or `Updated`.
    ///
    /// [`resolve_upsert`]: crate::domain::snapshot::resolve_upsert
    fn upsert_snapshot(
        &self,
        row: &DailyAdGroupForecastRow,
        computed_at: DateTime<Utc>,
    ) -> Result<SnapshotOutcome>;

    /// Snapshots dated within `range`, ordered by `(date, ad_group_id)`.
    fn snapshots_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<ForecastSnapshot>>;
}
