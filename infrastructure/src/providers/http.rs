//! HTTP transport for provider APIs.
//!
//! Posts a ready-made JSON request body to one endpoint and hands back the
//! JSON response. Request shaping lives in the protocol adapters; this type
//! only knows URLs, headers, and status codes.

use async_trait::async_trait;
use lisa_application::{GatewayError, ProviderTransport};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Error envelope shared by both provider families: `{"error": {"message": ..}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// JSON-over-HTTPS transport bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(
        endpoint: impl Into<String>,
        headers: HeaderMap,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            headers,
        })
    }

    /// Transport for an OpenAI chat-completions endpoint (bearer auth).
    pub fn openai(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);
        Self::new(
            format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            headers,
            timeout,
        )
    }

    /// Transport for the Anthropic messages endpoint.
    pub fn anthropic(
        base_url: &str,
        api_key: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-api-key"), header_value(api_key)?);
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            header_value(api_version)?,
        );
        Self::new(
            format!("{}/v1/messages", base_url.trim_end_matches('/')),
            headers,
            timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn header_value(value: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(value)
        .map_err(|_| GatewayError::Config("header value contains invalid characters".to_string()))
}

/// Extract a human-readable message from an error response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.to_string(),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Connection(e.to_string())
    }
}

#[async_trait]
impl ProviderTransport for HttpTransport {
    async fn send(&self, request: &Value) -> Result<Value, GatewayError> {
        debug!(url = %self.endpoint, "Sending provider request");
        trace!(request = %request, "Request payload");

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                map_reqwest_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!(status = %status, "Received provider response");

        if !status.is_success() {
            let message = error_message(&body);
            error!(status = %status, message = %message, "Provider API error");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::InvalidResponse(format!("response body is not JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_openai_endpoint() {
        let transport = HttpTransport::openai("https://api.openai.com/", "sk-test", TIMEOUT).unwrap();
        assert_eq!(transport.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(
            transport.headers.get(AUTHORIZATION).unwrap(),
            "Bearer sk-test"
        );
    }

    #[test]
    fn test_anthropic_endpoint_and_headers() {
        let transport = HttpTransport::anthropic(
            "https://api.anthropic.com",
            "key",
            ANTHROPIC_VERSION,
            TIMEOUT,
        )
        .unwrap();

        assert_eq!(transport.endpoint(), "https://api.anthropic.com/v1/messages");
        assert_eq!(transport.headers.get("x-api-key").unwrap(), "key");
        assert_eq!(
            transport.headers.get("anthropic-version").unwrap(),
            ANTHROPIC_VERSION
        );
    }

    #[test]
    fn test_invalid_key_is_config_error() {
        let result = HttpTransport::openai("https://api.openai.com", "bad\nkey", TIMEOUT);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": {"type": "invalid_request_error", "message": "bad model"}}"#),
            "bad model"
        );
        assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
        assert_eq!(error_message("  "), "empty response body");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Port 9 (discard) on localhost is almost never listening
        let transport = HttpTransport::openai("http://127.0.0.1:9", "k", TIMEOUT).unwrap();
        let result = transport.send(&serde_json::json!({})).await;
        assert!(matches!(
            result,
            Err(GatewayError::Connection(_)) | Err(GatewayError::Timeout)
        ));
    }
}
