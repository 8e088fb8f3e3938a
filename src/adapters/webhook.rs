use crate::domain::model::AppointmentEvent;
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts appointment status events as JSON to a configured endpoint. The
/// message transport itself (SMS, email) hangs off that endpoint, not off
/// this crate.
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn appointment_event(&self, event: &AppointmentEvent) -> Result<()> {
        tracing::debug!(
            "📡 Posting status event for {} to {}",
            event.tracking_id,
            self.endpoint
        );
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(event)
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }
}
