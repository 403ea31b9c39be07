//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgFunc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use memo_core::domain::{PageRequest, Post, PostFilter, PostPatch};
use memo_core::error::RepoError;
use memo_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Translate a listing filter into a WHERE clause. Absent keys add nothing.
fn filter_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all();
    if filter.is_unconstrained() {
        return condition;
    }

    if let Some(username) = &filter.username {
        condition = condition.add(post::Column::Username.eq(username.as_str()));
    }
    if let Some(tag) = &filter.tag {
        condition = condition
            .add(Expr::val(tag.as_str()).eq(PgFunc::any(Expr::col(post::Column::Tags))));
    }

    condition
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(
            page = page.number(),
            tag = ?filter.tag,
            username = ?filter.username,
            "Listing posts"
        );

        let result = PostEntity::find()
            .filter(filter_condition(filter))
            .order_by_desc(post::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active = model.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(body) = patch.body {
            active.body = Set(body);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(tags);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // Deleted between the read and the write.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }
}
