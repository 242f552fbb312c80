use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::repository::BlogRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub blogs: BlogRepository,
    pub blob_store: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            config: Arc::new(config),
            blogs: BlogRepository::new(db),
            blob_store,
        }
    }
}
