//! Parameterized SQL assembled from table descriptors
//!
//! Builders only produce statements; [`TableRepository`](super::TableRepository)
//! executes them. Every caller-supplied value is bound, never interpolated.
//! Offsets and limits are `i64` computed by [`Pagination`] and are written
//! into the statement text as literals.

use sqlx::{Postgres, QueryBuilder};

use super::error::RepositoryError;
use super::pagination::{FilterCondition, OrderDirection, Pagination};
use super::table::{FieldPresence, TableSpec};
use super::traits::RepositoryResult;

/// `INSERT ... RETURNING <columns>`
pub fn insert(spec: &TableSpec, values: Vec<String>) -> QueryBuilder<'static, Postgres> {
    debug_assert_eq!(spec.insert.len(), values.len());

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        spec.table,
        spec.insert.join(", ")
    ));
    {
        let mut separated = builder.separated(", ");
        for value in values {
            separated.push_bind(value);
        }
    }
    builder.push(") RETURNING ");
    builder.push(spec.columns.join(", "));
    builder
}

/// Point lookup of a live row
pub fn select_by_key(spec: &TableSpec, key: Vec<String>) -> QueryBuilder<'static, Postgres> {
    let mut builder = select(spec);
    push_key_predicate(&mut builder, spec, key);
    if spec.soft_delete {
        builder.push(" AND deleted_at = 0");
    }
    builder
}

/// Partial update of a live row
///
/// Only present values are written. Fails with `ValidationFailed` when none
/// are, before any statement reaches the database.
pub fn update(
    spec: &TableSpec,
    presence: FieldPresence,
    id: &str,
    values: Vec<Option<String>>,
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", spec.table));
    let mut assigned = 0;
    for (column, value) in spec.updatable.iter().zip(values) {
        if let Some(value) = presence.present(value) {
            builder.push(column).push(" = ").push_bind(value).push(", ");
            assigned += 1;
        }
    }
    if assigned == 0 {
        return Err(RepositoryError::no_fields_provided(spec.entity, id));
    }

    builder.push("updated_at = NOW() WHERE ");
    builder.push(spec.key[0]).push(" = ").push_bind(id.to_string());
    builder.push(" AND deleted_at = 0");
    Ok(builder)
}

/// Soft delete stamps `deleted_at`; tables without it lose the row
///
/// The soft variant does not look at the current `deleted_at`, so deleting
/// twice re-stamps the row.
pub fn delete(spec: &TableSpec, key: Vec<String>, now: i64) -> QueryBuilder<'static, Postgres> {
    if spec.soft_delete {
        let mut builder = QueryBuilder::new(format!("UPDATE {} SET deleted_at = ", spec.table));
        builder.push_bind(now);
        push_key_predicate(&mut builder, spec, key);
        builder
    } else {
        let mut builder = QueryBuilder::new(format!("DELETE FROM {}", spec.table));
        push_key_predicate(&mut builder, spec, key);
        builder
    }
}

/// Filtered, paginated listing of live rows
pub fn list(
    spec: &TableSpec,
    filters: Vec<FilterCondition>,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = select(spec);
    let mut has_where = false;
    if spec.soft_delete {
        builder.push(" WHERE deleted_at = 0");
        has_where = true;
    }
    for filter in filters {
        builder.push(if has_where { " AND " } else { " WHERE " });
        has_where = true;
        push_filter(&mut builder, "", &filter);
    }
    push_pagination(&mut builder, pagination);
    builder
}

/// Live tag names ranked by how many posts carry them
///
/// A tag with no associations still counts once.
pub fn famous_tags(
    name: Option<FilterCondition>,
    direction: OrderDirection,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT t.name, COUNT(*) AS count FROM tags t \
         LEFT JOIN post_tags pt ON pt.tag_id = t.id \
         WHERE t.deleted_at = 0",
    );
    if let Some(filter) = name {
        builder.push(" AND ");
        push_filter(&mut builder, "t.", &filter);
    }
    builder.push(format!(
        " GROUP BY t.name ORDER BY count {}, t.name ASC",
        direction.as_sql()
    ));
    push_pagination(&mut builder, pagination);
    builder
}

/// Live posts associated with a tag, one row per association
pub fn posts_by_tag(
    posts: &TableSpec,
    tag_id: &str,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let columns: Vec<String> = posts.columns.iter().map(|c| format!("p.{}", c)).collect();
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM {} p INNER JOIN post_tags pt ON p.id = pt.post_id WHERE pt.tag_id = ",
        columns.join(", "),
        posts.table
    ));
    builder.push_bind(tag_id.to_string());
    builder.push(" AND p.deleted_at = 0");
    push_pagination(&mut builder, pagination);
    builder
}

fn select(spec: &TableSpec) -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        spec.columns.join(", "),
        spec.table
    ))
}

fn push_key_predicate(
    builder: &mut QueryBuilder<'static, Postgres>,
    spec: &TableSpec,
    key: Vec<String>,
) {
    debug_assert_eq!(spec.key.len(), key.len());

    for (index, (column, value)) in spec.key.iter().zip(key).enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(column).push(" = ").push_bind(value);
    }
}

fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, alias: &str, filter: &FilterCondition) {
    builder
        .push(format!("{}{} {} ", alias, filter.field, filter.operator))
        .push_bind(filter.bind_value());
}

fn push_pagination(builder: &mut QueryBuilder<'static, Postgres>, pagination: Pagination) {
    builder.push(format!(
        " OFFSET {} LIMIT {}",
        pagination.offset, pagination.limit
    ));
}
