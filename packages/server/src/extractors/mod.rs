pub mod multipart;
pub mod query;
pub mod submission;

use axum::http::StatusCode;

use crate::error::AppError;

/// Map an axum rejection onto the JSON error contract, keeping 413 distinct.
fn rejection_error(status: StatusCode, body_text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(body_text)
    } else {
        AppError::Validation(body_text)
    }
}
