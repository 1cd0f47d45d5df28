//! Persisted forecast snapshots and the rules for overwriting them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::forecast::DailyAdGroupForecastRow;
use super::range::DateRange;

/// A forecast row as materialized at `computed_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSnapshot {
    #[serde(flatten)]
    pub row: DailyAdGroupForecastRow,
    pub computed_at: DateTime<Utc>,
}

/// Result of upserting one snapshot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SnapshotOutcome {
    /// No row existed for the key.
    Inserted,
    /// A row existed under the same or an older model and its figures changed.
    Updated,
    /// A row with identical figures and model version already existed.
    Unchanged,
    /// A row computed by a newer model exists; it was left alone.
    SkippedNewerModel { existing_version: u32 },
}

/// Decide how an incoming row affects whatever is stored for its key.
///
/// Snapshots never move backwards in model version, and rewriting identical
/// figures is a no-op so `computed_at` keeps its original value.
#[must_use]
pub fn resolve_upsert(
    existing: Option<&DailyAdGroupForecastRow>,
    incoming: &DailyAdGroupForecastRow,
) -> SnapshotOutcome {
    match existing {
        None => SnapshotOutcome::Inserted,
        Some(current) if current.model_version > incoming.model_version => {
            SnapshotOutcome::SkippedNewerModel {
                existing_version: current.model_version,
            }
        }
        Some(current) if current == incoming => SnapshotOutcome::Unchanged,
        Some(_) => SnapshotOutcome::Updated,
    }
}

/// Tally of one snapshot job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRunReport {
    pub run_id: Uuid,
    pub range: DateRange,
    pub model_name: String,
    pub model_version: u32,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl SnapshotRunReport {
    #[must_use]
    pub fn new(range: DateRange, model_name: impl Into<String>, model_version: u32) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            range,
            model_name: model_name.into(),
            model_version,
            inserted: 0,
            updated: 0,
            unchanged: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, outcome: SnapshotOutcome) {
        match outcome {
            SnapshotOutcome::Inserted => self.inserted += 1,
            SnapshotOutcome::Updated => self.updated += 1,
            SnapshotOutcome::Unchanged => self.unchanged += 1,
            SnapshotOutcome::SkippedNewerModel { .. } => self.skipped += 1,
        }
    }

    /// Rows written by this run.
    #[must_use]
    pub fn written(&self) -> usize {
        self.inserted + self.updated
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged + self.skipped
    }
}
