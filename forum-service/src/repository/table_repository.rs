//! The table-driven repository shared by every entity

use std::fmt;
use std::marker::PhantomData;

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{FilterCondition, OrderDirection, PageRequest, Pagination};
use super::query;
use super::table::{FieldPresence, Patch, Record, RecordKey, TableSpec};
use super::traits::{
    FamousTagRepository, PostsByTagRepository, Repository, RepositoryResult, UpdateRepository,
};
use crate::models::{Category, Comment, FamousTag, Post, PostTag, Tag};

pub type CategoryRepository = TableRepository<Category>;
pub type TagRepository = TableRepository<Tag>;
pub type PostRepository = TableRepository<Post>;
pub type CommentRepository = TableRepository<Comment>;
pub type PostTagRepository = TableRepository<PostTag>;

/// Repository over the table described by `R::TABLE`
///
/// Holds a clone of the shared pool; cloning the repository is cheap.
pub struct TableRepository<R> {
    pool: PgPool,
    presence: FieldPresence,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> TableRepository<R> {
    /// Repository using the default field presence policy
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            presence: FieldPresence::default(),
            _record: PhantomData,
        }
    }

    #[must_use]
    pub fn with_presence(mut self, presence: FieldPresence) -> Self {
        self.presence = presence;
        self
    }

    pub fn presence(&self) -> FieldPresence {
        self.presence
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl<R> Clone for TableRepository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            presence: self.presence,
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for TableRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRepository")
            .field("table", &R::TABLE.table)
            .field("presence", &self.presence)
            .finish()
    }
}

fn store_error(spec: &TableSpec, operation: RepositoryOperation, err: sqlx::Error) -> RepositoryError {
    let error = RepositoryError::from(err)
        .with_operation(operation)
        .with_entity_type(spec.entity);
    tracing::error!(
        table = spec.table,
        operation = %operation,
        kind = %error.kind,
        error = %error.message,
        "Repository operation failed"
    );
    error
}

fn decode<R: Record>(row: &PgRow, operation: RepositoryOperation) -> RepositoryResult<R> {
    R::from_row(row).map_err(|e| store_error(R::TABLE, operation, e))
}

impl<R: Record> Repository<R::Key, R, R::Create, R::Filter> for TableRepository<R> {
    async fn create(&self, data: R::Create) -> RepositoryResult<R> {
        let spec = R::TABLE;
        let mut builder = query::insert(spec, R::insert_values(data));
        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(spec, RepositoryOperation::Create, e))?;
        decode(&row, RepositoryOperation::Create)
    }

    async fn get_by_id(&self, key: &R::Key) -> RepositoryResult<R> {
        let spec = R::TABLE;
        let mut builder = query::select_by_key(spec, key.key_values());
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(spec, RepositoryOperation::FindById, e))?;

        match row {
            Some(row) => decode(&row, RepositoryOperation::FindById),
            None => {
                tracing::debug!(table = spec.table, key = %key, "No live row for key");
                Err(RepositoryError::not_found(spec.entity, key.to_string()))
            }
        }
    }

    async fn delete(&self, key: &R::Key) -> RepositoryResult<bool> {
        let spec = R::TABLE;
        let operation = if spec.soft_delete {
            RepositoryOperation::SoftDelete
        } else {
            RepositoryOperation::Delete
        };
        let mut builder = query::delete(spec, key.key_values(), Utc::now().timestamp());
        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(spec, operation, e))?;

        let touched = result.rows_affected() > 0;
        if !touched {
            tracing::debug!(table = spec.table, key = %key, "Delete matched no rows");
        }
        Ok(touched)
    }

    async fn list(&self, filter: R::Filter, page: PageRequest) -> RepositoryResult<Vec<R>> {
        let spec = R::TABLE;
        let filters = spec.filter_conditions(self.presence, R::filter_values(filter));
        let mut builder = query::list(spec, filters, Pagination::from(page));
        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(spec, RepositoryOperation::List, e))?;

        rows.iter()
            .map(|row| decode(row, RepositoryOperation::List))
            .collect()
    }
}

impl<R> UpdateRepository<String, R, R::Update> for TableRepository<R>
where
    R: Patch<Key = String>,
{
    async fn update(&self, id: &String, data: R::Update) -> RepositoryResult<R> {
        let spec = R::TABLE;
        let mut builder = query::update(spec, self.presence, id, R::update_values(data))?;
        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(spec, RepositoryOperation::Update, e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(spec.entity, id.as_str())
                .with_operation(RepositoryOperation::Update));
        }

        // A delete landing between the two statements surfaces as NotFound
        self.get_by_id(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Update))
    }
}

impl FamousTagRepository<FamousTag> for TableRepository<Tag> {
    async fn famous_tags(
        &self,
        name: Option<String>,
        descending: bool,
        page: PageRequest,
    ) -> RepositoryResult<Vec<FamousTag>> {
        let name = self
            .presence
            .present(name)
            .map(|name| FilterCondition::contains("name", name));
        let mut builder = query::famous_tags(
            name,
            OrderDirection::from_descending(descending),
            Pagination::from(page),
        );
        builder
            .build_query_as::<FamousTag>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(Tag::TABLE, RepositoryOperation::FamousTags, e))
    }
}

impl PostsByTagRepository<Post> for TableRepository<PostTag> {
    async fn posts_by_tag(&self, tag_id: &str, page: PageRequest) -> RepositoryResult<Vec<Post>> {
        let mut builder = query::posts_by_tag(Post::TABLE, tag_id, Pagination::from(page));
        builder
            .build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(PostTag::TABLE, RepositoryOperation::PostsByTag, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://forum@localhost:5432/forum")
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_without_fields_never_reaches_the_store() {
        // The lazy pool has no server behind it; the validation error must
        // come back before any connection is attempted.
        let repo = PostRepository::new(lazy_pool());
        let err = repo
            .update(&"post_1".to_string(), crate::models::UpdatePost::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, crate::repository::RepositoryErrorKind::ValidationFailed);
        assert_eq!(err.entity_id.as_deref(), Some("post_1"));
    }

    #[tokio::test]
    async fn test_presence_is_carried_by_clones() {
        let repo = TagRepository::new(lazy_pool()).with_presence(FieldPresence::Explicit);
        assert_eq!(repo.clone().presence(), FieldPresence::Explicit);
        assert!(format!("{:?}", repo).contains("tags"));
    }
}
