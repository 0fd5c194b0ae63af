use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Textlens API",
        version = "1.0.0",
        description = "Extract text from uploaded images with Tesseract OCR.",
    ),
    paths(
        handlers::health::health_check,
        handlers::recognize::recognize_text,
    ),
    components(schemas(
        response::ResponseStatus,
        response::ErrorEnvelope,
        models::RecognitionResult,
        handlers::health::HealthResponse,
        handlers::recognize::RecognizeTextResponse,
    )),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "ocr", description = "Image text recognition"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/api/docs", ApiDoc::openapi()).into()
}
