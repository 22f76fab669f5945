//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::storage::Reading;

// ============================================
// READING DTOs
// ============================================

/// Body of `POST /api/readings`: one reading or an array of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReadingsPayload {
    Many(Vec<Reading>),
    One(Box<Reading>),
}

impl ReadingsPayload {
    pub fn into_vec(self) -> Vec<Reading> {
        match self {
            ReadingsPayload::Many(readings) => readings,
            ReadingsPayload::One(reading) => vec![*reading],
        }
    }
}

/// Response to an accepted POST
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Status: "ok"
    pub status: String,
    /// Number of readings stored
    pub accepted: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of stored readings
    pub readings: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
