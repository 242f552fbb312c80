use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::entity::blog;
use crate::error::AppError;
use crate::models::shared::empty_as_none;

/// Query parameters for `GET /fetch-blogs`.
#[derive(Debug, Default, Deserialize)]
pub struct BlogListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<u64>,
}

impl BlogListQuery {
    /// Apply defaults and bounds, yielding `(limit, offset)`.
    pub fn resolve(&self, pagination: PaginationConfig) -> Result<(u64, u64), AppError> {
        let limit = self.limit.unwrap_or(pagination.default_limit);
        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be a positive integer".into(),
            ));
        }
        let limit = limit.min(pagination.max_limit);
        Ok((limit, self.offset.unwrap_or(0)))
    }
}

/// A stored blog post as returned by the list endpoint.
///
/// Field names mirror the `blogs` table columns.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    #[schema(example = 12)]
    pub blog_id: i32,
    #[schema(example = "Launch")]
    pub headline: String,
    pub short_description: Option<String>,
    pub content: Option<String>,
    #[schema(example = "https://example.com/launch")]
    pub link: Option<String>,
    #[schema(example = "/uploads/01936f0e-1234-7abc-8000-000000000001-cover.png")]
    pub image_url: Option<String>,
}

impl From<blog::Model> for BlogResponse {
    fn from(model: blog::Model) -> Self {
        Self {
            blog_id: model.blog_id,
            headline: model.headline,
            short_description: model.short_description,
            content: model.content,
            link: model.link,
            image_url: model.image_url,
        }
    }
}

/// Text fields of `POST /submit-blog`, shared by every accepted body encoding.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBlogForm {
    /// Required; a submission without it is rejected.
    #[schema(example = "Launch")]
    pub news_headline: Option<String>,
    pub short_description: Option<String>,
    pub blog_content: Option<String>,
    #[schema(example = "https://example.com/launch")]
    pub blog_link: Option<String>,
}

/// Echo of a freshly submitted post.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBlog {
    pub headline: String,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    /// Public path of the uploaded image, or null when none was attached.
    pub file_path: Option<String>,
    pub id: i32,
}

/// Response for `POST /submit-blog`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBlogResponse {
    #[schema(example = "Blog submitted successfully!")]
    pub message: String,
    pub blog_id: i32,
    pub blog: SubmittedBlog,
}
