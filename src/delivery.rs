//! @ai:module:intent Hand a finished report to the client by webhook or mailto link
//! @ai:module:layer infrastructure
//! @ai:module:public_api WebhookPayload, DeliveryClientTrait, WebhookClient, MockDeliveryClient, validate_email, mailto_link
//! @ai:module:stateless false

use crate::config::DeliveryConfig;
use crate::error::{Error, Result};
use crate::report::ReportAnalysis;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// @ai:intent Check an address has the local@domain.tld shape
/// @ai:effects pure
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL.is_match(email.trim()) {
        Ok(())
    } else {
        Err(Error::InvalidEmail(email.to_string()))
    }
}

/// @ai:intent Body posted to the delivery webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub email: String,
    pub subject: String,
    pub message: String,
    pub file_name: String,
    pub markdown: String,
}

impl WebhookPayload {
    /// @ai:intent Build a payload for a report, addressed to the given email
    /// @ai:pre email passes validate_email
    /// @ai:effects pure
    pub fn for_report(
        email: &str,
        config: &DeliveryConfig,
        analysis: &ReportAnalysis,
        file_name: &str,
        markdown: String,
    ) -> Result<Self> {
        validate_email(email)?;

        let name = analysis.client.name.trim();
        let greeting = if name.is_empty() { "Client" } else { name };

        Ok(Self {
            email: email.trim().to_string(),
            subject: config.subject.clone(),
            message: format!("Hello {},\n\n{}", greeting, config.message),
            file_name: file_name.to_string(),
            markdown,
        })
    }
}

/// @ai:intent Acknowledgement from a delivery endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub status: u16,
}

/// @ai:intent Trait for report delivery
pub trait DeliveryClientTrait: Send + Sync {
    /// @ai:intent Send a report payload
    fn deliver(
        &self,
        payload: &WebhookPayload,
    ) -> impl Future<Output = Result<DeliveryReceipt>> + Send;
}

/// @ai:intent Posts payloads as JSON to a webhook URL
pub struct WebhookClient {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WebhookClient {
    /// @ai:intent Create a client for a webhook URL
    /// @ai:pre url is an absolute http(s) URL
    /// @ai:effects pure
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| Error::Delivery(format!("invalid webhook URL {}: {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Delivery(e.to_string()))?;

        Ok(Self { client, url })
    }

    /// @ai:intent Create a client from delivery configuration
    /// @ai:pre config.webhook_url is set
    /// @ai:effects pure
    pub fn from_config(config: &DeliveryConfig) -> Result<Self> {
        let url = config
            .webhook_url
            .as_deref()
            .ok_or_else(|| Error::Delivery("webhook URL not configured".to_string()))?;
        Self::new(url, Duration::from_secs(config.timeout_secs))
    }
}

impl DeliveryClientTrait for WebhookClient {
    /// @ai:intent POST the payload and require a success status
    /// @ai:effects network
    async fn deliver(&self, payload: &WebhookPayload) -> Result<DeliveryReceipt> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Delivery(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Delivery(format!(
                "webhook returned {}: {}",
                status, error_text
            )));
        }

        tracing::info!("Delivered {} to {}", payload.file_name, payload.email);
        Ok(DeliveryReceipt {
            status: status.as_u16(),
        })
    }
}

/// @ai:intent Mock client for testing
pub struct MockDeliveryClient {
    sent: tokio::sync::Mutex<Vec<WebhookPayload>>,
}

impl MockDeliveryClient {
    /// @ai:intent Create a mock client that accepts every payload
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            sent: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    /// @ai:intent Payloads received so far
    /// @ai:effects pure
    pub async fn sent(&self) -> Vec<WebhookPayload> {
        self.sent.lock().await.clone()
    }
}

impl Default for MockDeliveryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryClientTrait for MockDeliveryClient {
    /// @ai:intent Record the payload
    /// @ai:effects state:write
    async fn deliver(&self, payload: &WebhookPayload) -> Result<DeliveryReceipt> {
        self.sent.lock().await.push(payload.clone());
        Ok(DeliveryReceipt { status: 200 })
    }
}

/// @ai:intent Compose a mailto: link with percent-encoded subject and body
/// @ai:effects pure
pub fn mailto_link(email: &str, subject: &str, body: &str) -> Result<String> {
    validate_email(email)?;

    let mut url = reqwest::Url::parse(&format!("mailto:{}", email.trim()))
        .map_err(|_| Error::InvalidEmail(email.to_string()))?;
    url.query_pairs_mut()
        .append_pair("subject", subject)
        .append_pair("body", body);

    // Form encoding writes spaces as '+', which mail clients show literally.
    Ok(url.to_string().replace('+', "%20"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::input::{ClientInfo, Measurements, ReportRequest};
    use crate::report::{MockChartRenderer, ReportAssembler};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn analysis(name: &str) -> ReportAnalysis {
        let request = ReportRequest::new(ClientInfo::named(name), Measurements::new());
        ReportAssembler::new(MockChartRenderer::new(1, 1), &ReportConfig::default())
            .analyze(&request, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email(" jane@example.com ").is_ok());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane doe@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(matches!(
            validate_email("nope"),
            Err(Error::InvalidEmail(e)) if e == "nope"
        ));
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let payload = WebhookPayload::for_report(
            "jane@example.com",
            &DeliveryConfig::default(),
            &analysis("Jane"),
            "environmental-report-jane-2026-03-14.md",
            "# Report".to_string(),
        )
        .unwrap();

        assert_eq!(payload.subject, "Your Environmental Test Report");
        assert!(payload.message.starts_with("Hello Jane,"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fileName"], "environmental-report-jane-2026-03-14.md");
        assert_eq!(json["markdown"], "# Report");
    }

    #[test]
    fn test_payload_rejects_bad_email() {
        let err = WebhookPayload::for_report(
            "not-an-email",
            &DeliveryConfig::default(),
            &analysis(""),
            "r.md",
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEmail(_)));
    }

    #[test]
    fn test_mailto_link_encoding() {
        let link = mailto_link("jane@example.com", "Your Report", "Hello there").unwrap();
        assert_eq!(
            link,
            "mailto:jane@example.com?subject=Your%20Report&body=Hello%20there"
        );

        let link = mailto_link("jane@example.com", "A+B", "x").unwrap();
        assert!(link.contains("subject=A%2BB"));
    }

    #[tokio::test]
    async fn test_mock_client_records_payloads() {
        let client = MockDeliveryClient::new();
        let payload = WebhookPayload::for_report(
            "jane@example.com",
            &DeliveryConfig::default(),
            &analysis(""),
            "r.md",
            String::new(),
        )
        .unwrap();
        assert!(payload.message.starts_with("Hello Client,"));

        let receipt = client.deliver(&payload).await.unwrap();
        assert_eq!(receipt.status, 200);
        assert_eq!(client.sent().await, vec![payload]);
    }

    #[test]
    fn test_webhook_client_requires_url() {
        assert!(WebhookClient::from_config(&DeliveryConfig::default()).is_err());
        assert!(WebhookClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(WebhookClient::new("https://hooks.example.com/report", Duration::from_secs(1)).is_ok());
    }
}
