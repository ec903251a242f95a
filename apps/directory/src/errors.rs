use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please upload a CSV or ZIP file containing a CSV.")]
    UnsupportedFileType,

    #[error("No CSV file found in ZIP.")]
    MissingCsvInArchive,

    /// Multipart body could not be read. Carries the status axum chose
    /// (400, or 413 when the body limit was hit).
    #[error("Upload error: {message}")]
    Upload { status: StatusCode, message: String },

    /// The upload could not be read as tabular data. The message is shown to
    /// the user.
    #[error("Error reading file: {0}")]
    Parse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedFileType => AppError::UnsupportedFileType,
            IngestError::MissingCsvInArchive => AppError::MissingCsvInArchive,
            other => AppError::Parse(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FILE_TYPE",
                self.to_string(),
            ),
            AppError::MissingCsvInArchive => (
                StatusCode::BAD_REQUEST,
                "MISSING_CSV_IN_ARCHIVE",
                self.to_string(),
            ),
            AppError::Upload { status, message } => (*status, "UPLOAD_ERROR", message.clone()),
            AppError::Parse(_) => {
                tracing::warn!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    self.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_errors_map_to_client_and_server_errors() {
        let status = |e: IngestError| AppError::from(e).into_response().status();
        assert_eq!(status(IngestError::UnsupportedFileType), StatusCode::BAD_REQUEST);
        assert_eq!(status(IngestError::MissingCsvInArchive), StatusCode::BAD_REQUEST);
        assert_eq!(status(IngestError::NoColumns), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status(IngestError::Archive("bad zip".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_error_surfaces_parser_message() {
        let err = AppError::from(IngestError::NoColumns);
        assert_eq!(err.to_string(), "Error reading file: No columns to parse from file");
    }

    #[test]
    fn test_upload_error_keeps_status() {
        let err = AppError::Upload {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
