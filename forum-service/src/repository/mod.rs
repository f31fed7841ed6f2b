//! Table-driven repositories for the forum entities
//!
//! One generic [`TableRepository`] serves every entity. Per-entity behavior
//! lives in a static [`TableSpec`] (columns, keys, filters, soft delete) and
//! in the [`Record`]/[`Patch`] impls that turn payloads into column values.
//!
//! # Features
//!
//! - **Partial updates**: only supplied fields are written; an update with
//!   nothing to write fails with `ValidationFailed` before touching the store
//! - **Soft delete**: `deleted_at` holds the Unix time of deletion, and every
//!   read skips rows where it is non-zero
//! - **Filtering**: exact or case-insensitive substring match per column
//! - **Pagination**: [`PageRequest`] with shared defaults
//!
//! # Example
//!
//! ```rust,ignore
//! use forum_service::models::{CreatePost, UpdatePost};
//! use forum_service::repository::{Repository, UpdateRepository};
//!
//! let post = storage.posts().create(CreatePost {
//!     user_id: "u1".into(),
//!     title: "Hello".into(),
//!     body: "First post".into(),
//!     category_id: category.id.clone(),
//! }).await?;
//!
//! let renamed = storage.posts().update(&post.id, UpdatePost {
//!     title: Some("Hello again".into()),
//!     ..Default::default()
//! }).await?;
//! ```

mod error;
mod pagination;
pub mod query;
mod table;
mod table_repository;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use pagination::{
    FilterCondition, FilterOperator, OrderDirection, PageRequest, Pagination, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE,
};
pub use table::{FieldPresence, FilterColumn, Patch, Record, RecordKey, TableSpec};
pub use table_repository::{
    CategoryRepository, CommentRepository, PostRepository, PostTagRepository, TableRepository,
    TagRepository,
};
pub use traits::{
    FamousTagRepository, PostsByTagRepository, Repository, RepositoryResult, UpdateRepository,
};
