//! Debounced spreadsheet sync.
//!
//! Write paths signal every accepted edit; the scheduler waits until no edit
//! has arrived for the debounce interval and then pushes one fresh report.
//!
//! ```text
//! PUT /orders ──┐
//! PUT /ad-spend ├─ notify() ──(mpsc)──> SheetSyncScheduler
//! PUT /ad-groups┘                           |
//!                                           +-- each signal resets the timer
//!                                           +-- quiet for debounce → report
//!                                                       |
//!                                                       v
//!                                                SheetPublisher
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::application::forecast::{ForecastQuery, ForecastService};
use crate::domain::DateRange;
use crate::error::Result;
use crate::port::outbound::{ChangeNotifier, SheetPublisher};

/// Configuration for the sheet sync scheduler.
#[derive(Debug, Clone)]
pub struct SheetSyncConfig {
    /// Quiet period required before a push.
    pub debounce: Duration,
    /// Trailing days (ending today) included in each push.
    pub window_days: u32,
}

/// Cloneable handle that write paths use to signal edits.
///
/// The background task stops once every handle has been dropped, flushing a
/// pending push first.
#[derive(Clone)]
pub struct SheetSyncHandle {
    tx: mpsc::Sender<()>,
}

impl ChangeNotifier for SheetSyncHandle {
    fn notify(&self) {
        // A full channel already guarantees a pending push.
        if let Err(mpsc::error::TrySendError::Closed(())) = self.tx.try_send(()) {
            debug!("Sheet sync task stopped; edit not forwarded");
        }
    }
}

pub struct SheetSyncScheduler {
    config: SheetSyncConfig,
    forecast: Arc<ForecastService>,
    publisher: Arc<dyn SheetPublisher>,
}

impl SheetSyncScheduler {
    pub fn new(
        config: SheetSyncConfig,
        forecast: Arc<ForecastService>,
        publisher: Arc<dyn SheetPublisher>,
    ) -> Self {
        Self {
            config,
            forecast,
            publisher,
        }
    }

    /// Spawn the debounce task and return the notifier handle.
    pub fn start(self) -> SheetSyncHandle {
        let (tx, mut rx) = mpsc::channel::<()>(64);
        let scheduler = Arc::new(self);

        tokio::spawn(async move {
            info!(
                debounce_ms = scheduler.config.debounce.as_millis() as u64,
                publisher = scheduler.publisher.name(),
                "Sheet sync scheduler started"
            );

            // Idle until the first edit of a burst arrives.
            while rx.recv().await.is_some() {
                let mut closed = false;
                loop {
                    tokio::select! {
                        signal = rx.recv() => {
                            if signal.is_none() {
                                closed = true;
                                break;
                            }
                            trace!("Edit received, debounce timer reset");
                        }
                        _ = tokio::time::sleep(scheduler.config.debounce) => break,
                    }
                }

                scheduler.push().await;

                if closed {
                    break;
                }
            }

            info!("Sheet sync scheduler stopped");
        });

        SheetSyncHandle { tx }
    }

    /// Build and publish one report. Failures are logged, never propagated.
    async fn push(&self) {
        match self.build_report().await {
            Ok(report) => match self.publisher.publish(&report).await {
                Ok(()) => {
                    debug!(
                        publisher = self.publisher.name(),
                        rows = report.rows.len(),
                        "Pushed forecast to sheet"
                    );
                }
                Err(e) => {
                    warn!(publisher = self.publisher.name(), error = %e, "Sheet sync failed");
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to build report for sheet sync");
            }
        }
    }

    async fn build_report(&self) -> Result<crate::domain::ForecastReport> {
        let forecast = self.forecast.clone();
        let window_days = self.config.window_days;
        tokio::task::spawn_blocking(move || {
            let range = DateRange::trailing(forecast.today(), window_days);
            forecast.report(&ForecastQuery::new(range, None))
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forecast::{Aggregator, CalibrationWindow, ProjectionEstimator};
    use crate::domain::FixedConfidenceModel;
    use crate::testkit::{InMemoryStore, RecordingPublisher};
    use rust_decimal_macros::dec;

    fn forecast(store: Arc<InMemoryStore>) -> Arc<ForecastService> {
        let model = Arc::new(FixedConfidenceModel::try_new(dec!(1)).unwrap());
        let estimator = ProjectionEstimator::new(
            model,
            store.clone(),
            CalibrationWindow {
                maturation_days: 14,
                lookback_days: 0,
            },
        );
        Arc::new(ForecastService::new(
            Aggregator::new(store.clone(), store.clone()),
            estimator,
            store,
            366,
        ))
    }

    fn scheduler(publisher: Arc<RecordingPublisher>) -> SheetSyncHandle {
        SheetSyncScheduler::new(
            SheetSyncConfig {
                debounce: Duration::from_millis(50),
                window_days: 7,
            },
            forecast(Arc::new(InMemoryStore::default())),
            publisher,
        )
        .start()
    }

    #[tokio::test]
    async fn burst_of_edits_coalesces_into_one_push() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handle = scheduler(publisher.clone());

        for _ in 0..10 {
            handle.notify();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(publisher.count(), 1);
    }

    #[tokio::test]
    async fn separate_bursts_push_separately() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handle = scheduler(publisher.clone());

        handle.notify();
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.notify();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(publisher.count(), 2);
    }

    #[tokio::test]
    async fn no_edits_no_push() {
        let publisher = Arc::new(RecordingPublisher::default());
        let _handle = scheduler(publisher.clone());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(publisher.count(), 0);
    }

    #[tokio::test]
    async fn publish_failure_does_not_stop_the_scheduler() {
        let publisher = Arc::new(RecordingPublisher::failing());
        let handle = scheduler(publisher.clone());

        handle.notify();
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.notify();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(publisher.attempts(), 2);
        assert_eq!(publisher.count(), 0);
    }
}
