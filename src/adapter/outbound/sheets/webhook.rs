//! JSON webhook sheet publisher.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::domain::ForecastReport;
use crate::error::Result;
use crate::port::outbound::SheetPublisher;

/// Publishes reports by POSTing them to a webhook URL.
#[derive(Debug)]
pub struct WebhookSheetPublisher {
    client: Client,
    url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    generated_at: DateTime<Utc>,
    report: &'a ForecastReport,
}

impl WebhookSheetPublisher {
    /// Create a publisher with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SheetPublisher for WebhookSheetPublisher {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn publish(&self, report: &ForecastReport) -> Result<()> {
        let payload = Payload {
            generated_at: Utc::now(),
            report,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        debug!(status = %response.status(), rows = report.rows.len(), "Webhook accepted report");
        Ok(())
    }
}
