//! `POST /api/recognize-text`.
//!
//! Lifecycle per request: validate the multipart upload, run OCR on the
//! blocking pool, normalize the result. Every failure is turned into an
//! error envelope here; nothing propagates to the server.

use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::info;

use crate::api::response::{ApiResponse, ErrorEnvelope, ResponseStatus};
use crate::api::state::AppState;
use crate::api::upload::read_upload;
use crate::error::Result;
use crate::models::RecognitionResult;

/// Success body, for the OpenAPI document.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RecognizeTextResponse {
    pub status: ResponseStatus,
    pub data: RecognitionResult,
}

#[utoipa::path(
    post,
    path = "/api/recognize-text",
    tag = "ocr",
    request_body(
        content_type = "multipart/form-data",
        content = String,
        description = "`image`: JPEG, PNG, GIF, BMP, WEBP or TIFF file up to 10MB. `language`: optional Tesseract language code (default `eng`)."
    ),
    responses(
        (status = 200, description = "Text recognized", body = RecognizeTextResponse),
        (status = 400, description = "Invalid upload or image the engine could not read", body = ErrorEnvelope),
        (status = 500, description = "OCR engine fault", body = ErrorEnvelope),
    )
)]
pub async fn recognize_text(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResponse<RecognitionResult> {
    match recognize(&state, multipart).await {
        Ok(result) => ApiResponse::success(result),
        Err(err) => ApiResponse::from_error(err, state.config.server.environment),
    }
}

async fn recognize(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<RecognitionResult> {
    let upload = read_upload(
        multipart,
        &state.config.upload,
        &state.config.ocr.default_language,
    )
    .await?;

    let started = Instant::now();
    let size = upload.image.len();
    let raw = state.ocr.recognize(upload.image, &upload.language).await?;
    let result = RecognitionResult::from_raw(raw, upload.language);

    info!(
        engine = state.ocr.engine_name(),
        file = upload.file_name.as_deref().unwrap_or("-"),
        format = %upload.format,
        size,
        language = %result.language,
        words = result.word_count,
        confidence = result.confidence,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Text recognized"
    );

    Ok(result)
}
