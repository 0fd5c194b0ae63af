use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ocr::RawRecognition;

/// Normalized OCR output returned inside the success envelope.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    /// Recognized text with surrounding whitespace trimmed.
    pub text: String,
    /// Engine-reported mean confidence (Tesseract: 0-100).
    pub confidence: f32,
    /// Number of words the engine segmented; 0 when it reported none.
    pub word_count: usize,
    /// Language pack the image was recognized with.
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

impl RecognitionResult {
    pub fn from_raw(raw: RawRecognition, language: impl Into<String>) -> Self {
        Self::from_raw_at(raw, language, Utc::now())
    }

    pub fn from_raw_at(
        raw: RawRecognition,
        language: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            text: raw.text.trim().to_string(),
            confidence: raw.confidence,
            word_count: raw.word_count.unwrap_or(0),
            language: language.into(),
            timestamp,
        }
    }
}
