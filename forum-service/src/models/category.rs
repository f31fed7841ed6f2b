use chrono::{DateTime, Utc};

use crate::ids::{EntityId, EntityKind};
use crate::repository::{FilterColumn, Patch, Record, TableSpec};

/// A category that groups posts
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

/// Listing filter; `name` matches as a case-insensitive substring
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub name: Option<String>,
}

impl Record for Category {
    type Key = String;
    type Create = CreateCategory;
    type Filter = CategoryFilter;

    const TABLE: &'static TableSpec = &TableSpec {
        table: "categories",
        entity: "Category",
        key: &["id"],
        columns: &["id", "name", "created_at", "updated_at", "deleted_at"],
        insert: &["id", "name"],
        updatable: &["name"],
        filters: &[FilterColumn::contains("name")],
        soft_delete: true,
    };

    fn insert_values(data: CreateCategory) -> Vec<String> {
        vec![EntityId::new(EntityKind::Category).into(), data.name]
    }

    fn filter_values(filter: CategoryFilter) -> Vec<Option<String>> {
        vec![filter.name]
    }
}

impl Patch for Category {
    type Update = UpdateCategory;

    fn update_values(data: UpdateCategory) -> Vec<Option<String>> {
        vec![data.name]
    }
}
