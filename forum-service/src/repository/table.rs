//! Static table descriptors and the record traits built on them
//!
//! Each entity describes its table once, as a `&'static TableSpec`. The query
//! builder and [`TableRepository`](super::TableRepository) read everything
//! they need from it, so adding a column is a one-line change in the model.

use std::fmt;

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use super::pagination::{FilterCondition, FilterOperator};

/// How an optional string field decides whether it was supplied
///
/// Protobuf clients that predate `optional` fields cannot tell "unset" from
/// "set to the empty string", so by default both mean "not provided".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPresence {
    /// `None` and `Some("")` are both absent
    #[default]
    EmptyIsAbsent,
    /// Only `None` is absent; an empty string is a real value
    Explicit,
}

impl FieldPresence {
    /// Build the policy from the `repository.empty_fields_are_absent` setting
    pub const fn from_empty_is_absent(empty_is_absent: bool) -> Self {
        if empty_is_absent {
            Self::EmptyIsAbsent
        } else {
            Self::Explicit
        }
    }

    /// Keep the value only if it counts as supplied under this policy
    ///
    /// ```rust
    /// use forum_service::repository::FieldPresence;
    ///
    /// assert_eq!(FieldPresence::EmptyIsAbsent.present(Some(String::new())), None);
    /// assert_eq!(FieldPresence::Explicit.present(Some(String::new())), Some(String::new()));
    /// ```
    pub fn present(self, value: Option<String>) -> Option<String> {
        match (self, value) {
            (Self::EmptyIsAbsent, Some(value)) if value.is_empty() => None,
            (_, value) => value,
        }
    }
}

/// A filterable column and how it is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterColumn {
    pub column: &'static str,
    pub operator: FilterOperator,
}

impl FilterColumn {
    /// Exact-match filter
    pub const fn exact(column: &'static str) -> Self {
        Self {
            column,
            operator: FilterOperator::Equal,
        }
    }

    /// Case-insensitive substring filter
    pub const fn contains(column: &'static str) -> Self {
        Self {
            column,
            operator: FilterOperator::Contains,
        }
    }
}

/// Static description of one table
#[derive(Debug)]
pub struct TableSpec {
    /// Table name
    pub table: &'static str,
    /// Entity name used in errors and logs
    pub entity: &'static str,
    /// Key columns, in the order [`RecordKey::key_values`] returns them
    pub key: &'static [&'static str],
    /// Columns selected by every read, in `FromRow` order
    pub columns: &'static [&'static str],
    /// Columns written by an insert, in [`Record::insert_values`] order
    pub insert: &'static [&'static str],
    /// Columns a partial update may set, in [`Patch::update_values`] order
    pub updatable: &'static [&'static str],
    /// Filterable columns, in [`Record::filter_values`] order
    pub filters: &'static [FilterColumn],
    /// Whether the table carries `deleted_at`
    pub soft_delete: bool,
}

impl TableSpec {
    /// Pair filter columns with the caller's values, dropping absent ones
    pub fn filter_conditions(
        &self,
        presence: FieldPresence,
        values: Vec<Option<String>>,
    ) -> Vec<FilterCondition> {
        self.filters
            .iter()
            .zip(values)
            .filter_map(|(filter, value)| {
                presence
                    .present(value)
                    .map(|value| FilterCondition::new(filter.column, filter.operator, value))
            })
            .collect()
    }
}

/// Key used to address a single record
pub trait RecordKey: fmt::Display + Send + Sync {
    /// Values bound against [`TableSpec::key`], in order
    fn key_values(&self) -> Vec<String>;
}

impl RecordKey for String {
    fn key_values(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

/// A row type stored in a described table
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    type Key: RecordKey;
    type Create: Send;
    type Filter: Send;

    const TABLE: &'static TableSpec;

    /// Values for [`TableSpec::insert`], generating the id where there is one
    fn insert_values(data: Self::Create) -> Vec<String>;

    /// Filter values for [`TableSpec::filters`]
    fn filter_values(filter: Self::Filter) -> Vec<Option<String>>;
}

/// A record that supports partial updates
pub trait Patch: Record {
    type Update: Send;

    /// Values for [`TableSpec::updatable`]
    fn update_values(data: Self::Update) -> Vec<Option<String>>;
}
