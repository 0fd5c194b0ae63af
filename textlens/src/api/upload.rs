//! Multipart parsing and validation for `POST /api/recognize-text`.
//!
//! Gates run in a fixed order and the first failure wins: missing file,
//! unsupported content type, oversized file, invalid language. The image
//! field is streamed chunk by chunk so an oversized upload is rejected
//! without being buffered.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::config::UploadConfig;
use crate::error::{Result, TextlensError};
use crate::models::{ImageFormat, UploadRequest};

pub const IMAGE_FIELD: &str = "image";
pub const LANGUAGE_FIELD: &str = "language";

/// Bytes read from the language field before giving up on it.
const LANGUAGE_READ_CAP: usize = 256;

enum Capped {
    Complete(Vec<u8>),
    Overflowed,
}

enum LanguageField {
    Text(String),
    Invalid(String),
}

/// Read and validate the upload. A body that is not multipart at all is
/// treated as carrying no file.
pub async fn read_upload(
    multipart: std::result::Result<Multipart, MultipartRejection>,
    limits: &UploadConfig,
    default_language: &str,
) -> Result<UploadRequest> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Request body is not multipart");
        TextlensError::MissingFile
    })?;

    let mut image: Option<(Vec<u8>, ImageFormat, Option<String>)> = None;
    let mut language: Option<LanguageField> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, limits))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            // Only file parts count. A text field named `image` is ignored, as
            // is a file part with an empty filename (form sent with no file).
            IMAGE_FIELD if image.is_none() && field.file_name().is_some_and(|n| !n.is_empty()) => {
                let format = declared_format(&field)?;
                let file_name = field.file_name().map(str::to_string);
                let bytes = match read_capped(field, limits.max_file_size, limits).await? {
                    Capped::Complete(bytes) => bytes,
                    Capped::Overflowed => {
                        return Err(TextlensError::FileTooLarge {
                            limit: limits.max_file_size,
                        })
                    }
                };
                image = Some((bytes, format, file_name));
            }
            LANGUAGE_FIELD if language.is_none() => {
                language = Some(read_language_field(field, limits).await?);
            }
            _ => {}
        }
    }

    let (bytes, format, file_name) = image.ok_or(TextlensError::MissingFile)?;
    if bytes.is_empty() {
        return Err(TextlensError::MissingFile);
    }

    let language = match language {
        None => default_language.to_string(),
        Some(LanguageField::Invalid(reason)) => return Err(TextlensError::InvalidLanguage(reason)),
        Some(LanguageField::Text(raw)) => {
            validate_language(&raw, limits.max_language_length, default_language)?
        }
    };

    debug!(
        format = %format,
        size = bytes.len(),
        language = %language,
        "Upload accepted"
    );

    Ok(UploadRequest {
        image: bytes,
        format,
        file_name,
        language,
    })
}

/// Resolve a submitted language code. Blank means `default_language`.
///
/// Accepts Tesseract pack syntax: ASCII alphanumerics, `_` and `+`
/// (`eng`, `chi_sim`, `eng+fra`).
pub fn validate_language(raw: &str, max_length: usize, default_language: &str) -> Result<String> {
    let code = raw.trim();
    if code.is_empty() {
        return Ok(default_language.to_string());
    }

    if code.chars().count() > max_length {
        return Err(TextlensError::InvalidLanguage(format!(
            "'{code}' is longer than {max_length} characters"
        )));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+')
    {
        return Err(TextlensError::InvalidLanguage(format!(
            "'{code}' contains characters outside [A-Za-z0-9_+]"
        )));
    }

    Ok(code.to_string())
}

fn declared_format(field: &Field<'_>) -> Result<ImageFormat> {
    let declared = field.content_type().unwrap_or_default();
    ImageFormat::from_content_type(declared).ok_or_else(|| {
        TextlensError::UnsupportedFormat(if declared.is_empty() {
            "<none>".to_string()
        } else {
            declared.to_string()
        })
    })
}

async fn read_language_field(field: Field<'_>, limits: &UploadConfig) -> Result<LanguageField> {
    if field.file_name().is_some() {
        return Ok(LanguageField::Invalid(
            "language must be a text field, not a file".to_string(),
        ));
    }

    match read_capped(field, LANGUAGE_READ_CAP, limits).await? {
        Capped::Overflowed => Ok(LanguageField::Invalid(format!(
            "language value exceeds {LANGUAGE_READ_CAP} bytes"
        ))),
        Capped::Complete(bytes) => Ok(match String::from_utf8(bytes) {
            Ok(text) => LanguageField::Text(text),
            Err(_) => LanguageField::Invalid("language is not valid UTF-8".to_string()),
        }),
    }
}

/// Buffer a field, stopping as soon as it would exceed `cap` bytes.
async fn read_capped(mut field: Field<'_>, cap: usize, limits: &UploadConfig) -> Result<Capped> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| map_multipart_error(e, limits))?
    {
        if buffer.len() + chunk.len() > cap {
            return Ok(Capped::Overflowed);
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Capped::Complete(buffer))
}

fn map_multipart_error(err: MultipartError, limits: &UploadConfig) -> TextlensError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        TextlensError::FileTooLarge {
            limit: limits.max_file_size,
        }
    } else {
        TextlensError::MalformedUpload(err.body_text())
    }
}
