//! Repository trait definitions
//!
//! The traits use RPITIT (return position `impl Trait` in traits), so
//! implementations are written with plain `async fn` and no `async_trait`.
//!
//! - [`Repository`]: create, point lookup, delete and filtered listing
//! - [`UpdateRepository`]: partial update of the mutable fields
//! - [`FamousTagRepository`]: the ranked tag aggregate
//! - [`PostsByTagRepository`]: posts reachable through a tag
//!
//! # Example
//!
//! ```rust,ignore
//! use forum_service::models::{CreateTag, TagFilter};
//! use forum_service::repository::{PageRequest, Repository};
//!
//! let tag = storage.tags().create(CreateTag { name: "rust".into() }).await?;
//! let found = storage.tags().get_by_id(&tag.id).await?;
//! let page = storage
//!     .tags()
//!     .list(TagFilter { name: Some("ru".into()) }, PageRequest::new(1, 20))
//!     .await?;
//! ```

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::PageRequest;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait
///
/// # Type Parameters
///
/// - `Key`: how one record is addressed (an id, or the post/tag pair)
/// - `Entity`: the record returned from queries
/// - `Create`: the fields a caller supplies on creation
/// - `Filter`: optional listing filters
pub trait Repository<Key, Entity, Create, Filter>: Send + Sync {
    /// Insert a new record and return it with its server-assigned fields
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Fetch a live record
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` with `NotFound` kind when no live record
    /// matches, including records that were deleted.
    fn get_by_id(&self, key: &Key) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Delete a record
    ///
    /// Deleting something that does not exist is not an error. Returns
    /// whether any row was touched.
    fn delete(&self, key: &Key) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// List live records matching every present filter, one page at a time
    fn list(
        &self,
        filter: Filter,
        page: PageRequest,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;
}

/// Partial updates
pub trait UpdateRepository<Key, Entity, Update>: Send + Sync {
    /// Apply the present fields, stamp `updated_at` and return the fresh record
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when no field is present; nothing is written
    /// - `NotFound` when no live record matches
    fn update(
        &self,
        key: &Key,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Entity>> + Send;
}

/// Tag names ranked by use
pub trait FamousTagRepository<Ranked>: Send + Sync {
    /// Rank live tag names by the number of posts carrying them
    ///
    /// Ties are broken by name so that pages are stable.
    fn famous_tags(
        &self,
        name: Option<String>,
        descending: bool,
        page: PageRequest,
    ) -> impl Future<Output = RepositoryResult<Vec<Ranked>>> + Send;
}

/// Posts reachable through the post/tag association
pub trait PostsByTagRepository<Post>: Send + Sync {
    /// Live posts associated with `tag_id`
    ///
    /// A post associated twice with the same tag appears twice.
    fn posts_by_tag(
        &self,
        tag_id: &str,
        page: PageRequest,
    ) -> impl Future<Output = RepositoryResult<Vec<Post>>> + Send;
}
