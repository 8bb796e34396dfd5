//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PageRequest, PostChanges, PostFilter, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity, tags_to_json};
use super::entity::user::Entity as UserEntity;
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find_by_username(username)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

/// `SELECT` over posts restricted by `filter`.
fn filtered(filter: &PostFilter) -> Select<PostEntity> {
    let mut select = PostEntity::find();
    if let Some(tag) = &filter.tag {
        select = select.filter(PgExpr::contains(
            Expr::col(post::Column::Tags),
            Expr::val(serde_json::json!([tag])),
        ));
    }
    if let Some(username) = &filter.username {
        select = select.filter(post::Column::Username.eq(username.as_str()));
    }
    select
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let result = filtered(filter)
            .order_by_desc(post::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        filtered(filter).count(&self.db).await.map_err(query_error)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let mut update = PostEntity::update_many()
            .col_expr(post::Column::Image, Expr::value(changes.image))
            .filter(post::Column::Id.eq(id));
        if let Some(title) = changes.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(body) = changes.body {
            update = update.col_expr(post::Column::Body, Expr::value(body));
        }
        if let Some(tags) = changes.tags {
            update = update.col_expr(post::Column::Tags, Expr::value(tags_to_json(tags)));
        }

        let updated = update
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let updated = PostEntity::update_many()
            .col_expr(post::Column::Count, Expr::col(post::Column::Count).add(1))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(updated.into_iter().next().map(Into::into))
    }
}
