use std::fmt;

use chrono::{DateTime, Utc};

use crate::repository::{FilterColumn, Record, RecordKey, TableSpec};

/// Association between a post and a tag
///
/// There is no soft delete and no uniqueness: the same pair may be stored
/// more than once, and deleting a pair removes every copy.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostTag {
    pub post_id: String,
    pub tag_id: String,
    pub created_at: DateTime<Utc>,
}

/// The (post, tag) pair identifying an association
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostTagKey {
    pub post_id: String,
    pub tag_id: String,
}

impl PostTagKey {
    pub fn new(post_id: impl Into<String>, tag_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            tag_id: tag_id.into(),
        }
    }
}

impl fmt::Display for PostTagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.post_id, self.tag_id)
    }
}

impl RecordKey for PostTagKey {
    fn key_values(&self) -> Vec<String> {
        vec![self.post_id.clone(), self.tag_id.clone()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostTag {
    pub post_id: String,
    pub tag_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostTagFilter {
    pub post_id: Option<String>,
    pub tag_id: Option<String>,
}

impl Record for PostTag {
    type Key = PostTagKey;
    type Create = CreatePostTag;
    type Filter = PostTagFilter;

    const TABLE: &'static TableSpec = &TableSpec {
        table: "post_tags",
        entity: "PostTag",
        key: &["post_id", "tag_id"],
        columns: &["post_id", "tag_id", "created_at"],
        insert: &["post_id", "tag_id"],
        updatable: &[],
        filters: &[FilterColumn::exact("post_id"), FilterColumn::exact("tag_id")],
        soft_delete: false,
    };

    fn insert_values(data: CreatePostTag) -> Vec<String> {
        vec![data.post_id, data.tag_id]
    }

    fn filter_values(filter: PostTagFilter) -> Vec<Option<String>> {
        vec![filter.post_id, filter.tag_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_and_values() {
        let key = PostTagKey::new("post_1", "tag_1");
        assert_eq!(key.to_string(), "post_1/tag_1");
        assert_eq!(key.key_values(), vec!["post_1".to_string(), "tag_1".to_string()]);
    }
}
