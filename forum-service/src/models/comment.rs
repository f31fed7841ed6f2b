use chrono::{DateTime, Utc};

use crate::ids::{EntityId, EntityKind};
use crate::repository::{FilterColumn, Patch, Record, TableSpec};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CreateComment {
    pub post_id: String,
    pub user_id: String,
    pub body: String,
}

/// Only the body of a comment can change
#[derive(Debug, Clone, Default)]
pub struct UpdateComment {
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub post_id: Option<String>,
    pub user_id: Option<String>,
}

impl Record for Comment {
    type Key = String;
    type Create = CreateComment;
    type Filter = CommentFilter;

    const TABLE: &'static TableSpec = &TableSpec {
        table: "comments",
        entity: "Comment",
        key: &["id"],
        columns: &[
            "id",
            "post_id",
            "user_id",
            "body",
            "created_at",
            "updated_at",
            "deleted_at",
        ],
        insert: &["id", "post_id", "user_id", "body"],
        updatable: &["body"],
        filters: &[FilterColumn::exact("post_id"), FilterColumn::exact("user_id")],
        soft_delete: true,
    };

    fn insert_values(data: CreateComment) -> Vec<String> {
        vec![
            EntityId::new(EntityKind::Comment).into(),
            data.post_id,
            data.user_id,
            data.body,
        ]
    }

    fn filter_values(filter: CommentFilter) -> Vec<Option<String>> {
        vec![filter.post_id, filter.user_id]
    }
}

impl Patch for Comment {
    type Update = UpdateComment;

    fn update_values(data: UpdateComment) -> Vec<Option<String>> {
        vec![data.body]
    }
}
