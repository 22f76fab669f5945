//! Export Routes
//!
//! - GET /api/readings/export - All readings as a CSV download

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::transfer::{export_csv, export_file_name};

/// GET /api/readings/export
pub async fn export_readings(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let readings = state.store.list().await;
    let body = export_csv(&readings)?;
    let filename = export_file_name(Utc::now().date_naive());

    let disposition = format!("attachment; filename=\"{}\"", filename);

    tracing::debug!(rows = readings.len(), %filename, "Exporting readings");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        Body::from(body),
    )
        .into_response())
}
