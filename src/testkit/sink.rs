//! Recording doubles for outbound sinks.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ForecastReport;
use crate::error::{Error, Result};
use crate::port::outbound::{ChangeNotifier, SheetPublisher};

/// Publisher that keeps every successfully published report.
#[derive(Default)]
pub struct RecordingPublisher {
    reports: Mutex<Vec<ForecastReport>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingPublisher {
    /// Publisher whose every call fails with a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Successful publishes.
    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }

    /// Publish calls, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn reports(&self) -> Vec<ForecastReport> {
        self.reports.lock().clone()
    }
}

#[async_trait]
impl SheetPublisher for RecordingPublisher {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn publish(&self, report: &ForecastReport) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Connection("sheet unavailable".into()));
        }
        self.reports.lock().push(report.clone());
        Ok(())
    }
}

/// Notifier that counts signals.
#[derive(Default)]
pub struct CountingNotifier {
    count: AtomicUsize,
}

impl CountingNotifier {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ChangeNotifier for CountingNotifier {
    fn notify(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
