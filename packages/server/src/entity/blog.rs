use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub blog_id: i32,

    #[sea_orm(column_type = "Text")]
    pub headline: String,

    #[sea_orm(column_type = "Text")]
    pub short_description: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub content: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub link: Option<String>,

    /// Public path of the attached image (`/uploads/...`). Not re-validated
    /// after insert.
    #[sea_orm(column_type = "Text")]
    pub image_url: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
