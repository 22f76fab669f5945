//! Reading Routes
//!
//! - GET /api/readings - All stored readings
//! - POST /api/readings - One reading or an array of readings

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{ReadingsPayload, SubmitResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::Reading;

/// GET /api/readings
pub async fn list_readings(State(state): State<Arc<AppState>>) -> Json<Vec<Reading>> {
    Json(state.store.list().await)
}

/// POST /api/readings
///
/// The body is parsed by hand so every malformed payload is a 400,
/// whatever its content type.
pub async fn submit_readings(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let payload: ReadingsPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid reading payload: {}", e)))?;

    let readings = payload.into_vec();
    if readings.is_empty() {
        return Err(ApiError::Validation("Empty batch".to_string()));
    }

    let accepted = state.store.append(readings).await?;
    tracing::info!(accepted, "Stored readings");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            status: "ok".to_string(),
            accepted,
        }),
    ))
}
