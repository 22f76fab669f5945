//! Remote Readings Service
//!
//! The dashboard talks to the readings server only through [`ReadingsApi`],
//! so tests can substitute an in-process fake for the HTTP client.

mod client;

pub use client::{ClientConfig, ClientError, ReadingsClient};

use async_trait::async_trait;

use crate::storage::Reading;

/// Operations the dashboard needs from the readings server
#[async_trait]
pub trait ReadingsApi: Send + Sync {
    /// Fetch every stored reading
    async fn fetch_readings(&self) -> Result<Vec<Reading>, ClientError>;

    /// Post one reading
    async fn submit_reading(&self, reading: &Reading) -> Result<(), ClientError>;

    /// Post many readings in a single request
    async fn submit_batch(&self, readings: &[Reading]) -> Result<(), ClientError>;
}
