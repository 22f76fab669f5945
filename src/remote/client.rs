//! Readings REST API Client
//!
//! HTTP client for the readings server's REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use super::ReadingsApi;
use crate::storage::Reading;

/// Readings REST API client
pub struct ReadingsClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the readings client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the readings server (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ReadingsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn readings_url(&self) -> String {
        format!("{}/api/readings", self.config.base_url.trim_end_matches('/'))
    }

    /// Send a POST request; the response body is not inspected
    async fn send_post<T: Serialize + ?Sized>(&self, body: &T) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.readings_url())
            .json(body)
            .send()
            .await
            .map_err(classify)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl ReadingsApi for ReadingsClient {
    async fn fetch_readings(&self) -> Result<Vec<Reading>, ClientError> {
        let response = self
            .client
            .get(self.readings_url())
            .send()
            .await
            .map_err(classify)?;

        if response.status().is_success() {
            let readings: Vec<Reading> = response.json().await.map_err(ClientError::Request)?;
            tracing::debug!(count = readings.len(), "Fetched readings");
            Ok(readings)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn submit_reading(&self, reading: &Reading) -> Result<(), ClientError> {
        self.send_post(reading).await?;
        tracing::debug!(id = %reading.id, "Submitted reading");
        Ok(())
    }

    async fn submit_batch(&self, readings: &[Reading]) -> Result<(), ClientError> {
        self.send_post(readings).await?;
        tracing::debug!(count = readings.len(), "Submitted reading batch");
        Ok(())
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when communicating with the readings server
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Readings server unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}
