//! Periodic snapshot job.
//!
//! Background task that re-snapshots the trailing days on a fixed interval so
//! late-maturing orders and corrected spend flow into history.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::persister::SnapshotPersister;
use crate::domain::DateRange;

/// Configuration for the snapshot scheduler.
#[derive(Debug, Clone)]
pub struct SnapshotScheduleConfig {
    /// Seconds between runs.
    pub interval: Duration,
    /// Trailing days re-snapshotted each run, ending yesterday.
    pub lookback_days: u32,
}

/// Handle for controlling the snapshot scheduler lifecycle.
pub struct SnapshotSchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl SnapshotSchedulerHandle {
    /// Signal the scheduler to stop after any in-flight run.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

pub struct SnapshotScheduler {
    config: SnapshotScheduleConfig,
    persister: Arc<SnapshotPersister>,
}

impl SnapshotScheduler {
    pub fn new(config: SnapshotScheduleConfig, persister: Arc<SnapshotPersister>) -> Self {
        Self { config, persister }
    }

    /// Range covered by the next run.
    #[must_use]
    pub fn next_range(&self) -> DateRange {
        DateRange::trailing(self.persister.default_date(), self.config.lookback_days)
    }

    /// Spawn the background task. The first run happens immediately.
    pub fn start(self) -> SnapshotSchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let scheduler = Arc::new(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                interval_secs = scheduler.config.interval.as_secs(),
                lookback_days = scheduler.config.lookback_days,
                "Snapshot scheduler started"
            );

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Snapshot scheduler shutting down");
                        break;
                    }

                    _ = ticker.tick() => {
                        let range = scheduler.next_range();
                        let persister = scheduler.persister.clone();
                        match tokio::task::spawn_blocking(move || persister.run(range)).await {
                            Ok(Ok(report)) => {
                                debug!(run_id = %report.run_id, written = report.written(), "Scheduled snapshot finished");
                            }
                            Ok(Err(e)) => {
                                error!(error = %e, "Scheduled snapshot failed");
                            }
                            Err(e) => {
                                error!(error = %e, "Scheduled snapshot task panicked");
                            }
                        }
                    }
                }
            }
        });

        SnapshotSchedulerHandle { shutdown_tx }
    }
}
