use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use thiserror::Error;

use crate::entity::blog;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Blog {0} not found")]
    NotFound(i32),

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
}

/// Fields accepted when creating a blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBlog {
    pub headline: String,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

/// Data access for the `blogs` table. Every call is a single statement.
#[derive(Clone)]
pub struct BlogRepository {
    db: DatabaseConnection,
}

impl BlogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest posts first, skipping `offset` rows and returning at most `limit`.
    pub async fn list(&self, limit: u64, offset: u64) -> Result<Vec<blog::Model>, RepositoryError> {
        let rows = blog::Entity::find()
            .order_by_desc(blog::Column::BlogId)
            .offset(Some(offset))
            .limit(Some(limit))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<blog::Model>, RepositoryError> {
        Ok(blog::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Insert a row and return its generated id.
    pub async fn insert(&self, new: NewBlog) -> Result<i32, RepositoryError> {
        let model = blog::ActiveModel {
            blog_id: NotSet,
            headline: Set(new.headline),
            short_description: Set(new.short_description),
            content: Set(new.content),
            link: Set(new.link),
            image_url: Set(new.image_url),
        };

        let result = blog::Entity::insert(model).exec(&self.db).await?;
        Ok(result.last_insert_id)
    }

    /// Delete one row by id, returning the affected count.
    ///
    /// Returns [`RepositoryError::NotFound`] when nothing matched.
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, RepositoryError> {
        let result = blog::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(result.rows_affected)
    }
}
