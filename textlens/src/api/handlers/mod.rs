pub(crate) mod health;
pub(crate) mod recognize;

use axum::http::StatusCode;

use super::response::ApiResponse;

pub use health::health_check;
pub use recognize::recognize_text;

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiResponse<()> {
    ApiResponse::error(StatusCode::NOT_FOUND, "Endpoint not found")
}
