use chrono::{DateTime, Utc};

use crate::ids::{EntityId, EntityKind};
use crate::repository::{FilterColumn, Patch, Record, TableSpec};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CreateTag {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTag {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub name: Option<String>,
}

/// A tag name and how often it is used
///
/// Tags are grouped by name, so two live tags sharing a name are ranked as
/// one entry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FamousTag {
    pub name: String,
    pub count: i64,
}

impl Record for Tag {
    type Key = String;
    type Create = CreateTag;
    type Filter = TagFilter;

    const TABLE: &'static TableSpec = &TableSpec {
        table: "tags",
        entity: "Tag",
        key: &["id"],
        columns: &["id", "name", "created_at", "updated_at", "deleted_at"],
        insert: &["id", "name"],
        updatable: &["name"],
        filters: &[FilterColumn::contains("name")],
        soft_delete: true,
    };

    fn insert_values(data: CreateTag) -> Vec<String> {
        vec![EntityId::new(EntityKind::Tag).into(), data.name]
    }

    fn filter_values(filter: TagFilter) -> Vec<Option<String>> {
        vec![filter.name]
    }
}

impl Patch for Tag {
    type Update = UpdateTag;

    fn update_values(data: UpdateTag) -> Vec<Option<String>> {
        vec![data.name]
    }
}
