use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextlensError {
    #[error("No image file provided")]
    MissingFile,

    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    #[error("Image exceeds the upload limit of {limit} bytes")]
    FileTooLarge { limit: usize },

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("Malformed multipart upload: {0}")]
    MalformedUpload(String),

    #[error("Failed to initialize OCR engine for '{language}': {reason}")]
    OcrInit { language: String, reason: String },

    #[error("OCR recognition failed: {0}")]
    OcrRecognition(String),

    #[error("OCR engine fault: {0}")]
    OcrEngine(String),

    #[error("OCR operation timed out after {0} seconds")]
    OcrTimeout(u64),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Classification of a [`TextlensError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingFile,
    UnsupportedFormat,
    FileTooLarge,
    InvalidLanguage,
    MalformedUpload,
    OcrInit,
    OcrRecognition,
    OcrEngine,
    OcrTimeout,
    Unclassified,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::UnsupportedFormat
            | Self::FileTooLarge
            | Self::InvalidLanguage
            | Self::MalformedUpload
            | Self::OcrInit
            | Self::OcrRecognition => StatusCode::BAD_REQUEST,
            Self::OcrEngine | Self::OcrTimeout | Self::Unclassified => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MissingFile => "missing_file",
            Self::UnsupportedFormat => "unsupported_format",
            Self::FileTooLarge => "file_too_large",
            Self::InvalidLanguage => "invalid_language",
            Self::MalformedUpload => "malformed_upload",
            Self::OcrInit => "ocr_init",
            Self::OcrRecognition => "ocr_recognition",
            Self::OcrEngine => "ocr_engine",
            Self::OcrTimeout => "ocr_timeout",
            Self::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

impl TextlensError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile => ErrorKind::MissingFile,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            Self::InvalidLanguage(_) => ErrorKind::InvalidLanguage,
            Self::MalformedUpload(_) => ErrorKind::MalformedUpload,
            Self::OcrInit { .. } => ErrorKind::OcrInit,
            Self::OcrRecognition(_) => ErrorKind::OcrRecognition,
            Self::OcrEngine(_) => ErrorKind::OcrEngine,
            Self::OcrTimeout(_) => ErrorKind::OcrTimeout,
            Self::Internal(_) => ErrorKind::Unclassified,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }

    /// Message safe to show any client. Raw engine and parser output is
    /// kept out of it; see [`std::fmt::Display`] for the detailed form.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingFile => {
                "No image file provided. Upload an image in the 'image' field.".to_string()
            }
            Self::UnsupportedFormat(_) => {
                "Invalid file type. Only JPEG, PNG, GIF, BMP, WEBP and TIFF images are allowed."
                    .to_string()
            }
            Self::FileTooLarge { limit } => format!(
                "File too large. Maximum size is {}.",
                crate::config::size_label(*limit)
            ),
            Self::InvalidLanguage(_) => format!(
                "Invalid language code. Expected at most {} characters such as 'eng' or 'eng+fra'.",
                crate::config::MAX_LANGUAGE_LENGTH
            ),
            Self::MalformedUpload(_) => "Malformed multipart upload.".to_string(),
            Self::OcrInit { language, .. } => {
                format!("Failed to initialize OCR for language '{language}'.")
            }
            Self::OcrRecognition(_) => {
                "Failed to process image. The file may be corrupt or unreadable.".to_string()
            }
            Self::OcrEngine(_) | Self::OcrTimeout(_) => "Error processing image".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextlensError>;
