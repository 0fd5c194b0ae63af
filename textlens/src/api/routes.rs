use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::answer_options;
use super::openapi;
use super::response::ApiResponse;
use super::AppState;

/// Room for multipart boundaries, part headers and the language field on top
/// of the per-file limit. The per-file limit is enforced while streaming; this
/// only caps the body as a whole.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state
        .config
        .upload
        .max_file_size
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/recognize-text", post(handlers::recognize_text))
        .route("/api/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        // Must come after every route so each method router picks it up.
        .method_not_allowed_fallback(handlers::not_found)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(answer_options))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "Handler panicked");

    ApiResponse::<()>::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        .into_response()
}
