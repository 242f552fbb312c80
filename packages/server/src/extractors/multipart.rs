use axum::extract::{FromRequest, Multipart, Request};

use super::rejection_error;
use crate::error::AppError;

/// A `Multipart` wrapper whose rejections are reported as `AppError`.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        Ok(AppMultipart(multipart))
    }
}
