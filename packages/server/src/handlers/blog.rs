use std::io;

use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use common::storage::{BlobStore, BoxReader, StorageError, StoredBlob};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::extractors::submission::Submission;
use crate::models::blog::{
    BlogListQuery, BlogResponse, SubmitBlogForm, SubmitBlogResponse, SubmittedBlog,
};
use crate::models::shared::MessageResponse;
use crate::repository::{NewBlog, RepositoryError};
use crate::routes::UPLOADS_PREFIX;
use crate::state::AppState;

/// Headroom on top of the file limit for the text fields and multipart framing.
const FORM_OVERHEAD: u64 = 1024 * 1024;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let limit = max_upload_size.saturating_add(FORM_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/fetch-blogs",
    tag = "Blogs",
    operation_id = "fetchBlogs",
    summary = "List blog posts",
    description = "Returns one page of blog posts, newest first. `limit` defaults to 9 and is \
        capped by the server; `offset` defaults to 0. Empty values count as absent.",
    params(
        ("limit" = Option<u64>, Query, description = "Maximum number of posts (>= 1)"),
        ("offset" = Option<u64>, Query, description = "Number of posts to skip"),
    ),
    responses(
        (status = 200, description = "Blog posts", body = Vec<BlogResponse>),
        (status = 400, description = "Malformed limit or offset (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BlogListQuery>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let (limit, offset) = query.resolve(state.config.pagination)?;

    let rows = state
        .blogs
        .list(limit, offset)
        .await
        .map_err(|e| AppError::storage("Failed to fetch blogs.", e))?;

    Ok(Json(rows.into_iter().map(BlogResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/submit-blog",
    tag = "Blogs",
    operation_id = "submitBlog",
    summary = "Create a blog post",
    description = "Accepts `newsHeadline` (required), `shortDescription`, `blogContent` and \
        `blogLink` as a multipart, urlencoded or JSON body. Multipart bodies may also carry one \
        `imageUpload` file, which is stored before the row is inserted and is kept even if the \
        insert fails.",
    request_body(
        description = "Blog fields, with an optional `imageUpload` file part for multipart bodies",
        content(
            (SubmitBlogForm = "multipart/form-data"),
            (SubmitBlogForm = "application/x-www-form-urlencoded"),
            (SubmitBlogForm = "application/json")
        )
    ),
    responses(
        (status = 200, description = "Blog created", body = SubmitBlogResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Upload too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR, IO_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, submission))]
pub async fn submit_blog(
    State(state): State<AppState>,
    submission: Submission<SubmitBlogForm>,
) -> Result<Json<SubmitBlogResponse>, AppError> {
    let (form, image) = match submission {
        Submission::Multipart(multipart) => read_multipart(&*state.blob_store, multipart).await?,
        Submission::Fields(form) => (form, None),
    };

    let headline = form
        .news_headline
        .ok_or_else(|| AppError::Validation("Missing 'newsHeadline' field".into()))?;
    let file_path = image.map(|blob| format!("{UPLOADS_PREFIX}/{}", blob.name));

    let new_blog = NewBlog {
        headline,
        short_description: form.short_description,
        content: form.blog_content,
        link: form.blog_link,
        image_url: file_path,
    };

    // An uploaded image is intentionally left in place if this fails.
    let id = state
        .blogs
        .insert(new_blog.clone())
        .await
        .map_err(|e| AppError::storage("Failed to save blog data.", e))?;

    info!(blog_id = id, "Blog submitted");

    Ok(Json(SubmitBlogResponse {
        message: "Blog submitted successfully!".into(),
        blog_id: id,
        blog: SubmittedBlog {
            headline: new_blog.headline,
            short_description: new_blog.short_description,
            content: new_blog.content,
            link: new_blog.link,
            file_path: new_blog.image_url,
            id,
        },
    }))
}

#[utoipa::path(
    delete,
    path = "/delete-blog/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog post",
    description = "Deletes the post row. Any uploaded image it referenced is left on disk.",
    params(("id" = String, Path, description = "Blog ID (integer)")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 400, description = "Invalid blog ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Invalid blog ID.".into()))?;
    // Integers beyond the column range cannot name a row.
    let id = i32::try_from(id).map_err(|_| AppError::NotFound("Blog not found.".into()))?;

    state.blogs.delete_by_id(id).await.map_err(|e| match e {
        RepositoryError::NotFound(_) => AppError::NotFound("Blog not found.".into()),
        RepositoryError::Storage(db) => AppError::storage("Failed to delete blog.", db),
    })?;

    info!(blog_id = id, "Blog deleted");

    Ok(Json(MessageResponse::new("Blog deleted successfully.")))
}

/// Walk the multipart fields, streaming `imageUpload` into the blob store.
async fn read_multipart(
    blob_store: &dyn BlobStore,
    mut multipart: Multipart,
) -> Result<(SubmitBlogForm, Option<StoredBlob>), AppError> {
    let mut form = SubmitBlogForm::default();
    let mut image: Option<StoredBlob> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("newsHeadline") => form.news_headline = Some(read_text(field).await?),
            Some("shortDescription") => form.short_description = Some(read_text(field).await?),
            Some("blogContent") => form.blog_content = Some(read_text(field).await?),
            Some("blogLink") => form.blog_link = Some(read_text(field).await?),
            Some("imageUpload") => {
                // Browsers send an empty part when no file was chosen.
                let Some(file_name) = field
                    .file_name()
                    .filter(|name| !name.trim().is_empty())
                    .map(str::to_owned)
                else {
                    continue;
                };
                if image.is_some() {
                    return Err(AppError::Validation(
                        "Only one 'imageUpload' file is accepted".into(),
                    ));
                }
                let stored = store_field(blob_store, &file_name, field).await?;
                info!(name = %stored.name, size = stored.size, "Stored uploaded image");
                image = Some(stored);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    Ok((form, image))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {err}"))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))
}

/// Stream a multipart file field straight into the blob store.
async fn store_field(
    blob_store: &dyn BlobStore,
    file_name: &str,
    field: Field<'_>,
) -> Result<StoredBlob, AppError> {
    let stream = field.map_err(|e| {
        let kind = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            io::ErrorKind::FileTooLarge
        } else {
            io::ErrorKind::InvalidData
        };
        io::Error::new(kind, e.body_text())
    });
    let reader: BoxReader<'_> = Box::pin(StreamReader::new(stream));

    blob_store
        .store_stream(file_name, reader)
        .await
        .map_err(|e| match e {
            StorageError::Io(e) if e.kind() == io::ErrorKind::FileTooLarge => {
                AppError::PayloadTooLarge(e.to_string())
            }
            StorageError::Io(e) if e.kind() == io::ErrorKind::InvalidData => {
                AppError::Validation(format!("Upload read error: {e}"))
            }
            StorageError::Io(e) => AppError::io("Failed to store uploaded file.", e),
            other => other.into(),
        })
}
