use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use mime_guess::mime::{self, Mime};
use serde::de::DeserializeOwned;

use super::multipart::AppMultipart;
use super::rejection_error;
use crate::error::AppError;

/// A form submission, dispatched on `Content-Type`.
///
/// `multipart/form-data` bodies are handed over unread so file parts can be
/// streamed. Urlencoded and JSON bodies are decoded into `T`.
pub enum Submission<T> {
    Multipart(Multipart),
    Fields(T),
}

impl<S, T> FromRequest<S> for Submission<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Mime>().ok());

        let Some(content_type) = content_type else {
            return Err(unsupported());
        };

        if content_type.type_() == mime::MULTIPART && content_type.subtype() == mime::FORM_DATA {
            let AppMultipart(multipart) = AppMultipart::from_request(req, state).await?;
            Ok(Submission::Multipart(multipart))
        } else if content_type.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
        {
            let Form(fields) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            Ok(Submission::Fields(fields))
        } else if content_type.essence_str() == mime::APPLICATION_JSON.essence_str() {
            let Json(fields) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            Ok(Submission::Fields(fields))
        } else {
            Err(unsupported())
        }
    }
}

fn unsupported() -> AppError {
    AppError::Validation(
        "Expected a multipart/form-data, application/x-www-form-urlencoded or application/json body"
            .into(),
    )
}
