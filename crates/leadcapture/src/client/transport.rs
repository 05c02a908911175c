use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::forms::domain::{FormKind, SubmissionRequest, SubmissionResult};

/// Status and decoded body of an endpoint response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub result: SubmissionResult,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http client setup failed: {0}")]
    Setup(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("malformed response (status {status}): {detail}")]
    MalformedResponse { status: u16, detail: String },
}

/// Carries one submission to its endpoint. Implementations must not retry.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, request: &SubmissionRequest) -> Result<TransportResponse, TransportError>;
}

/// JSON-over-HTTP transport used against a running intake server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::Setup(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint_url(&self, kind: FormKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint_url(request.kind());
        let response = self
            .client
            .post(&url)
            .json(request.fields())
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status().as_u16();
        let result = response
            .json::<SubmissionResult>()
            .await
            .map_err(|err| TransportError::MalformedResponse {
                status,
                detail: err.to_string(),
            })?;

        Ok(TransportResponse { status, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let transport = HttpTransport::new(&ClientConfig {
            base_url: "https://landing.example.com/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .expect("client builds");

        assert_eq!(
            transport.endpoint_url(FormKind::Newsletter),
            "https://landing.example.com/api/subscribe"
        );
        assert_eq!(
            transport.endpoint_url(FormKind::Contact),
            "https://landing.example.com/api/contact"
        );
    }

    #[test]
    fn only_2xx_counts_as_success() {
        let ok = TransportResponse {
            status: 200,
            result: SubmissionResult::accepted("ok"),
        };
        let rejected = TransportResponse {
            status: 400,
            result: SubmissionResult::failed("Valid email is required"),
        };
        assert!(ok.is_success());
        assert!(!rejected.is_success());
    }
}
