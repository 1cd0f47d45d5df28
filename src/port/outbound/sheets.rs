//! Spreadsheet sync sink port.

use async_trait::async_trait;

use crate::domain::ForecastReport;
use crate::error::Result;

/// Pushes the current forecast report to an external spreadsheet.
#[async_trait]
pub trait SheetPublisher: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn publish(&self, report: &ForecastReport) -> Result<()>;
}
