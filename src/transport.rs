use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client as HttpClient;

use crate::error::{DecodeStage, TrackingError};

pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Raw answer of the tracking service, before any status classification
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one serialized envelope and returns whatever came back.
///
/// Failing to connect is a `Transport` error. Failing to read the body once
/// the status line arrived is a recoverable `ResponseDecode`. HTTP status
/// codes are left for the caller to classify.
#[async_trait::async_trait]
pub trait EnvelopeTransport: Send + Sync {
    async fn post(&self, envelope: String) -> Result<RawResponse, TrackingError>;
}

pub struct HttpTransport {
    endpoint_url: String,
    http_client: HttpClient,
}

impl HttpTransport {
    pub fn new(endpoint_url: String, timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder()
            .gzip(true)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(endpoint_url, http_client))
    }

    pub fn with_client(endpoint_url: String, http_client: HttpClient) -> Self {
        Self {
            endpoint_url,
            http_client,
        }
    }
}

#[async_trait::async_trait]
impl EnvelopeTransport for HttpTransport {
    async fn post(&self, envelope: String) -> Result<RawResponse, TrackingError> {
        let response = self
            .http_client
            .post(&self.endpoint_url)
            .header(reqwest::header::CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(envelope)
            .send()
            .await
            .map_err(|e| TrackingError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        // The service answered; a broken body only spoils this batch.
        let body = response.text().await.map_err(|e| TrackingError::ResponseDecode {
            stage: DecodeStage::Body,
            message: e.to_string(),
        })?;

        Ok(RawResponse { status, body })
    }
}
