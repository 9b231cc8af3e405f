use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::claim::ClaimSubmission;
use crate::error::{FnolError, Result};

pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(60);

/// Returned in place of recommendations the workflow did not provide
pub const NO_RECOMMENDATIONS: &str = "No recommendations available";

/// What the workflow webhook answered, parsed best-effort
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutcome {
    pub recommendations: Value,
    pub raw: Value,
}

impl WorkflowOutcome {
    /// Parses a webhook response body. Never fails: anything that is not a
    /// JSON document degrades to the default recommendations and a `null` raw value.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(raw) => {
                let recommendations = raw
                    .get("recommendations")
                    .cloned()
                    .unwrap_or_else(|| Value::String(NO_RECOMMENDATIONS.to_string()));
                Self {
                    recommendations,
                    raw,
                }
            }
            Err(e) => {
                warn!(error = %e, body_length = body.len(), "Webhook returned malformed JSON");
                Self {
                    recommendations: Value::String(NO_RECOMMENDATIONS.to_string()),
                    raw: Value::Null,
                }
            }
        }
    }
}

/// Hands a claim to the third-party workflow
#[async_trait]
pub trait ClaimWorkflow: Send + Sync {
    async fn submit(&self, claim: &ClaimSubmission) -> Result<WorkflowOutcome>;
}

/// `ClaimWorkflow` that posts the claim as JSON to a webhook URL
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ClaimWorkflow for WebhookClient {
    async fn submit(&self, claim: &ClaimSubmission) -> Result<WorkflowOutcome> {
        info!(
            url = %self.url,
            incident_type = %claim.incident_type,
            image_count = claim.images.len(),
            "Submitting claim to workflow webhook"
        );

        let response = self.http.post(&self.url).json(claim).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FnolError::WebhookStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        info!(status = %status, body_length = body.len(), "Workflow webhook responded");

        Ok(WorkflowOutcome::from_body(&body))
    }
}
