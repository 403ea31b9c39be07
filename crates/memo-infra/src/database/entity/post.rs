//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use memo_core::domain::{Post, PostAuthor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            tags: model.tags,
            user: PostAuthor {
                id: model.user_id,
                username: model.username,
            },
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            body: Set(post.body),
            tags: Set(post.tags),
            user_id: Set(post.user.id),
            username: Set(post.user.username),
        }
    }
}
