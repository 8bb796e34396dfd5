//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Post, PostAuthor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub published_date: DateTimeWithTimeZone,
    pub count: i64,
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
            image: model.image,
            tags: tags_from_json(model.tags),
            published_date: model.published_date.into(),
            count: model.count,
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
            image: Set(post.image),
            tags: Set(tags_to_json(post.tags)),
            published_date: Set(post.published_date.into()),
            count: Set(post.count),
            user_id: Set(post.user.id),
            username: Set(post.user.username),
        }
    }
}

pub(crate) fn tags_to_json(tags: Vec<String>) -> Json {
    Json::Array(tags.into_iter().map(Json::String).collect())
}

fn tags_from_json(tags: Json) -> Vec<String> {
    match tags {
        Json::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Json::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
