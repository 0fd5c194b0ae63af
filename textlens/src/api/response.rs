//! # Response Envelope
//!
//! Every endpoint except `/health` answers with an [`ApiResponse<T>`]:
//!
//! ```json
//! { "status": "success", "data": { ... } }
//! { "status": "error", "message": "...", "error": "..." }
//! ```
//!
//! `error` carries the raw failure text and is only present when the server
//! runs in development mode. `message` is always safe to show end users.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::config::Environment;
use crate::error::TextlensError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Wire shape of an error response, for the OpenAPI document.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    pub status: ResponseStatus,
    pub message: String,
    /// Raw failure detail. Development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    http_status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
            error: None,
            http_status: StatusCode::OK,
        }
    }

    pub fn error(http_status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
            error: None,
            http_status,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error = Some(detail.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    /// Build the error envelope for a failed request and log it.
    ///
    /// Status comes from [`TextlensError::kind`]. The raw `Display` text is
    /// attached only in development mode.
    pub fn from_error(err: TextlensError, environment: Environment) -> Self {
        let kind = err.kind();
        let status = kind.status();

        if status.is_server_error() {
            error!(kind = %kind, error = %err, "Request failed");
        } else {
            warn!(kind = %kind, error = %err, "Request rejected");
        }

        let response = Self::error(status, err.public_message());
        if environment.is_development() {
            response.with_detail(err.to_string())
        } else {
            response
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.http_status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to serialize response envelope");
                let body = serde_json::json!({
                    "status": "error",
                    "message": "Internal server error"
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
