use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Blog not found.")]
    pub error: String,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `PAYLOAD_TOO_LARGE`, `STORAGE_ERROR`, `IO_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    PayloadTooLarge(String),
    /// Database failure. `message` goes to the client, `detail` to the log.
    Storage {
        message: &'static str,
        detail: String,
    },
    /// Filesystem failure while writing or serving a blob.
    Io {
        message: &'static str,
        detail: String,
    },
    Internal(String),
}

impl AppError {
    pub fn storage(message: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Storage {
            message,
            detail: err.to_string(),
        }
    }

    pub fn io(message: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Io {
            message,
            detail: err.to_string(),
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    code: "VALIDATION_ERROR",
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg,
                    code: "NOT_FOUND",
                },
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    error: msg,
                    code: "PAYLOAD_TOO_LARGE",
                },
            ),
            AppError::Storage { message, detail } => {
                tracing::error!("{message} {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: message.into(),
                        code: "STORAGE_ERROR",
                    },
                )
            }
            AppError::Io { message, detail } => {
                tracing::error!("{message} {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: message.into(),
                        code: "IO_ERROR",
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "An unexpected error occurred".into(),
                        code: "INTERNAL_ERROR",
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) | StorageError::InvalidName(_) => {
                AppError::NotFound("File not found.".into())
            }
            StorageError::SizeLimitExceeded { limit } => {
                AppError::PayloadTooLarge(format!("File exceeds maximum size of {limit} bytes"))
            }
            StorageError::Io(e) => AppError::io("Blob storage failure.", e),
        }
    }
}
