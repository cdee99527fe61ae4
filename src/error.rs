use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::io;

/// Message returned while the classifier has not produced an export yet.
pub const NOT_READY_MESSAGE: &str = "No export file yet. Run classifier.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", NOT_READY_MESSAGE)]
    NotReady,

    #[error("Invalid query: {0}")]
    BadQuery(#[from] QueryRejection),

    #[error("Malformed export file: {0}")]
    MalformedExport(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotReady => {
                tracing::warn!("Export file missing, reporting not ready");
                (StatusCode::SERVICE_UNAVAILABLE, NOT_READY_MESSAGE.to_string())
            }
            AppError::BadQuery(rejection) => {
                tracing::debug!(error = %rejection, "Rejected query string");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            _ => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_is_503() {
        let response = AppError::NotReady.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_ready_message() {
        assert_eq!(AppError::NotReady.to_string(), NOT_READY_MESSAGE);
    }

    #[test]
    fn test_malformed_export_is_500() {
        let parse_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let response = AppError::from(parse_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_is_500() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
