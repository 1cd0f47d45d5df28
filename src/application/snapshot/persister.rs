//! Snapshot persister: materializes forecast rows into versioned snapshots.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::application::forecast::ForecastService;
use crate::domain::{AdGroupId, DateRange, ForecastSnapshot, SnapshotOutcome, SnapshotRunReport};
use crate::error::Result;
use crate::port::outbound::SnapshotRepository;

pub struct SnapshotPersister {
    forecast: Arc<ForecastService>,
    snapshots: Arc<dyn SnapshotRepository>,
}

impl SnapshotPersister {
    pub fn new(forecast: Arc<ForecastService>, snapshots: Arc<dyn SnapshotRepository>) -> Self {
        Self {
            forecast,
            snapshots,
        }
    }

    /// Yesterday relative to the forecast clock; the default snapshot day.
    #[must_use]
    pub fn default_date(&self) -> NaiveDate {
        self.forecast.today() - Duration::days(1)
    }

    /// Keys in `range` that already hold a snapshot for a settled day.
    fn settled_keys(&self, range: &DateRange) -> Result<HashSet<(NaiveDate, AdGroupId)>> {
        let settled = self.forecast.settled_through();
        if range.from() > settled {
            return Ok(HashSet::new());
        }
        let window = DateRange::new(range.from(), range.to().min(settled))?;
        Ok(self
            .snapshots
            .snapshots_in_range(&window, None)?
            .into_iter()
            .map(|s| (s.row.date, s.row.ad_group_id))
            .collect())
    }

    /// Snapshot every key in `range` with the active model.
    ///
    /// A stored snapshot for a settled day is kept as is and counted as
    /// unchanged: calibration compares it with what matured, so rewriting it
    /// would feed the run its own output. Other rows are upserted one by
    /// one; the first storage failure aborts the run and is returned to the
    /// caller without retrying.
    ///
    /// # Errors
    /// Propagates validation, computation and persistence failures.
    pub fn run(&self, range: DateRange) -> Result<SnapshotRunReport> {
        let rows = self.forecast.compute(&range, None)?;
        let settled = self.settled_keys(&range)?;
        let mut report = SnapshotRunReport::new(
            range,
            self.forecast.model_name(),
            self.forecast.model_version(),
        );
        let computed_at = Utc::now();

        for row in &rows {
            if settled.contains(&(row.date, row.ad_group_id.clone())) {
                report.record(SnapshotOutcome::Unchanged);
                continue;
            }
            let outcome = self.snapshots.upsert_snapshot(row, computed_at)?;
            if let SnapshotOutcome::SkippedNewerModel { existing_version } = outcome {
                warn!(
                    date = %row.date,
                    ad_group = %row.ad_group_id,
                    existing_version,
                    model_version = row.model_version,
                    "Snapshot computed by newer model kept"
                );
            }
            report.record(outcome);
        }

        if !settled.is_empty() {
            debug!(kept = settled.len(), "Settled snapshots left untouched");
        }

        info!(
            run_id = %report.run_id,
            from = %range.from(),
            to = %range.to(),
            model = %report.model_name,
            model_version = report.model_version,
            inserted = report.inserted,
            updated = report.updated,
            unchanged = report.unchanged,
            skipped = report.skipped,
            "Snapshot run complete"
        );

        Ok(report)
    }

    /// Stored snapshots for trend queries.
    ///
    /// # Errors
    /// Propagates validation and repository failures.
    pub fn history(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<ForecastSnapshot>> {
        self.forecast.validate(range, ad_group)?;
        self.snapshots.snapshots_in_range(range, ad_group)
    }
}
