//! # forum-service
//!
//! gRPC content service for a discussion forum: categories, tags, posts,
//! comments and the post/tag associations between them, stored in
//! PostgreSQL.
//!
//! ## Features
//!
//! - **Table-driven repositories**: one generic repository for every entity,
//!   driven by static table descriptors
//! - **Partial updates**: only supplied fields are written
//! - **Soft delete**: deleted rows keep their data and disappear from reads
//! - **Filtered listing**: exact and case-insensitive substring filters with
//!   pagination
//! - **Cross-entity queries**: posts by tag and tags ranked by use
//! - **gRPC**: tonic services with health checks, reflection, request IDs
//!   and structured logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use forum_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let storage = Storage::connect(&config).await?;
//!     let tag = storage.tags().create(CreateTag { name: "rust".into() }).await?;
//!     let ranked = storage
//!         .tags()
//!         .famous_tags(None, true, PageRequest::new(1, 10))
//!         .await?;
//!     println!("{} is one of {} tag names", tag.name, ranked.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod grpc;
pub mod ids;
pub mod models;
pub mod observability;
pub mod repository;
pub mod storage;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::ids::{EntityId, EntityKind, RequestId};
    pub use crate::models::{
        Category, CategoryFilter, Comment, CommentFilter, CreateCategory, CreateComment,
        CreatePost, CreatePostTag, CreateTag, FamousTag, Post, PostFilter, PostTag,
        PostTagFilter, PostTagKey, Tag, TagFilter, UpdateCategory, UpdateComment, UpdatePost,
        UpdateTag,
    };
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        FamousTagRepository, FieldPresence, PageRequest, PostsByTagRepository, Repository,
        RepositoryError, RepositoryErrorKind, UpdateRepository,
    };
    pub use crate::storage::Storage;
}
