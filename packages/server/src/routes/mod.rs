use axum::Router;
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::blog::*;
use crate::handlers::file::*;
use crate::state::AppState;

/// URL prefix under which stored uploads are published.
pub const UPLOADS_PREFIX: &str = "/uploads";

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(submit_blog))
        .layer(upload_body_limit(config.storage.max_upload_size));

    OpenApiRouter::new()
        .routes(routes!(list_blogs))
        .routes(routes!(delete_blog))
        .routes(routes!(fetch_file))
        // Same lookup as `/file/{file_name}`, so only flat stored names resolve.
        .route(&format!("{UPLOADS_PREFIX}/{{file_name}}"), get(fetch_file))
        .merge(upload)
}

/// Frontend bundle at `/` plus its static tree as the fallback.
pub fn static_routes(config: &AppConfig) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(config.frontend.index_path()))
        .fallback_service(ServeDir::new(&config.frontend.dir))
}
