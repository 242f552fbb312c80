use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::storage::StorageError;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/file/{file_name}",
    tag = "Files",
    operation_id = "fetchFile",
    summary = "Download an uploaded file",
    description = "Streams a file from the upload area with a content type inferred from its \
        extension. Names that would resolve outside the upload area are treated as missing.",
    params(("file_name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Read failure (IO_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn fetch_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    let blob = state
        .blob_store
        .retrieve(&file_name)
        .await
        .map_err(|e| match e {
            StorageError::Io(e) => AppError::io("Error serving the file.", e),
            other => other.into(),
        })?;

    let mime = mime_guess::from_path(&blob.name).first_or_octet_stream();
    let body = Body::from_stream(ReaderStream::new(blob.reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, blob.size)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
