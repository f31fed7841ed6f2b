use chrono::{DateTime, Utc};

use crate::ids::{EntityId, EntityKind};
use crate::repository::{FilterColumn, Patch, Record, TableSpec};

/// A post written by a user in one category
///
/// `user_id` belongs to an external user service and `category_id` is not
/// checked against the categories table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub category_id: String,
}

/// Fields a post author may change; the owner is fixed
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<String>,
}

/// `user_id` and `category_id` match exactly, `title` and `body` as
/// case-insensitive substrings
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<String>,
}

impl Record for Post {
    type Key = String;
    type Create = CreatePost;
    type Filter = PostFilter;

    const TABLE: &'static TableSpec = &TableSpec {
        table: "posts",
        entity: "Post",
        key: &["id"],
        columns: &[
            "id",
            "user_id",
            "title",
            "body",
            "category_id",
            "created_at",
            "updated_at",
            "deleted_at",
        ],
        insert: &["id", "user_id", "title", "body", "category_id"],
        updatable: &["title", "body", "category_id"],
        filters: &[
            FilterColumn::exact("user_id"),
            FilterColumn::contains("title"),
            FilterColumn::contains("body"),
            FilterColumn::exact("category_id"),
        ],
        soft_delete: true,
    };

    fn insert_values(data: CreatePost) -> Vec<String> {
        vec![
            EntityId::new(EntityKind::Post).into(),
            data.user_id,
            data.title,
            data.body,
            data.category_id,
        ]
    }

    fn filter_values(filter: PostFilter) -> Vec<Option<String>> {
        vec![filter.user_id, filter.title, filter.body, filter.category_id]
    }
}

impl Patch for Post {
    type Update = UpdatePost;

    fn update_values(data: UpdatePost) -> Vec<Option<String>> {
        vec![data.title, data.body, data.category_id]
    }
}
