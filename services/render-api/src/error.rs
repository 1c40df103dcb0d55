//! Request failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use label_common::{ParseError, RenderError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong while serving a render request. The
/// `Display` text is the message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    // === Client Errors ===
    #[error("Invalid {0} parameter")]
    InvalidParameter(&'static str),

    #[error("Failed to read request body")]
    BodyReadError(String),

    #[error("Empty ZPL data")]
    EmptyPayload,

    #[error("No labels found in ZPL data")]
    NoLabelsFound,

    // === Server Errors ===
    #[error("Failed to parse ZPL: {0}")]
    ParseFailure(#[from] ParseError),

    #[error("Failed to render ZPL to PNG: {0}")]
    RenderFailure(#[from] RenderError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_)
            | ApiError::BodyReadError(_)
            | ApiError::EmptyPayload
            | ApiError::NoLabelsFound => StatusCode::BAD_REQUEST,
            ApiError::ParseFailure(_) | ApiError::RenderFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Short label used for the `outcome` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidParameter(_) => "invalid_parameter",
            ApiError::BodyReadError(_) => "body_read_error",
            ApiError::EmptyPayload => "empty_payload",
            ApiError::NoLabelsFound => "no_labels_found",
            ApiError::ParseFailure(_) => "parse_failure",
            ApiError::RenderFailure(_) => "render_failure",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::BodyReadError(cause) => {
                warn!(kind = self.kind(), cause = %cause, "Rejected render request")
            }
            _ if status.is_server_error() => {
                error!(kind = self.kind(), error = ?self, "Render request failed")
            }
            _ => warn!(kind = self.kind(), error = %self, "Rejected render request"),
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        for err in [
            ApiError::InvalidParameter("width"),
            ApiError::BodyReadError("connection reset".into()),
            ApiError::EmptyPayload,
            ApiError::NoLabelsFound,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err:?}");
        }
    }

    #[test]
    fn test_collaborator_errors_are_500() {
        let parse = ApiError::from(ParseError::UnterminatedLabel { offset: 0 });
        let render = ApiError::from(RenderError::Encoding("boom".into()));
        assert_eq!(parse.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(render.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            ApiError::InvalidParameter("dpmm").client_message(),
            "Invalid dpmm parameter"
        );
        assert_eq!(
            ApiError::BodyReadError("eof".into()).client_message(),
            "Failed to read request body"
        );
        assert_eq!(ApiError::EmptyPayload.client_message(), "Empty ZPL data");

        let parse = ApiError::from(ParseError::UnterminatedLabel { offset: 3 });
        assert!(parse.client_message().starts_with("Failed to parse ZPL: "));
        assert!(parse.client_message().contains("never closed"));

        let render = ApiError::from(RenderError::UnsupportedBarcodeData { character: '\u{e9}' });
        assert!(render
            .client_message()
            .starts_with("Failed to render ZPL to PNG: "));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NoLabelsFound.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
