use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::response::ResponseStatus;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health`
///
/// Liveness only. Does not touch the OCR engine.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ResponseStatus::Success,
        message: "OCR API is running".to_string(),
        timestamp: Utc::now(),
    })
}
