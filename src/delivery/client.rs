use super::message::DeliveryRequest;
use crate::config::DeliveryConfig;
use crate::error::{NoteError, Result};
use serde::Serialize;
use tracing::info;

/// External transactional email capability.
///
/// One call per note, asynchronous, no retry and no controller-imposed
/// timeout; whatever deadline applies is the capability's own.
#[async_trait::async_trait]
pub trait DeliveryService: Send + Sync {
    /// Submit one delivery request. Resolves Ok on acceptance,
    /// `NoteError::DeliveryFailed` on rejection or transport failure.
    async fn send(&self, request: &DeliveryRequest) -> Result<()>;

    /// Service name for logging
    fn name(&self) -> &str;
}

/// Envelope the EmailJS REST API expects: three opaque credential/template
/// identifiers wrapped around the flat template parameters.
#[derive(Debug, Serialize)]
struct EmailJsEnvelope<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a DeliveryRequest,
}

/// EmailJS REST client
pub struct EmailJsClient {
    http: reqwest::Client,
    config: DeliveryConfig,
}

impl EmailJsClient {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl DeliveryService for EmailJsClient {
    async fn send(&self, request: &DeliveryRequest) -> Result<()> {
        let envelope = EmailJsEnvelope {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: request,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| NoteError::DeliveryFailed {
                reason: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NoteError::DeliveryFailed {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        info!("Delivered note to {} via EmailJS", request.to_email);

        Ok(())
    }

    fn name(&self) -> &str {
        "emailjs"
    }
}
