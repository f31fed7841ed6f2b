//! Forum records and the payloads used to create, update and filter them
//!
//! Every record maps one table row. Timestamps are assigned by PostgreSQL;
//! `deleted_at` is `0` for live rows and the Unix time of deletion otherwise.

mod category;
mod comment;
mod post;
mod post_tag;
mod tag;

pub use category::{Category, CategoryFilter, CreateCategory, UpdateCategory};
pub use comment::{Comment, CommentFilter, CreateComment, UpdateComment};
pub use post::{CreatePost, Post, PostFilter, UpdatePost};
pub use post_tag::{CreatePostTag, PostTag, PostTagFilter, PostTagKey};
pub use tag::{CreateTag, FamousTag, Tag, TagFilter, UpdateTag};
