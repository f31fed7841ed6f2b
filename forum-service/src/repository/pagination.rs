//! Pagination, ordering and filtering types for repository queries
//!
//! Every listing operation shares one pagination policy: a non-positive page
//! size falls back to [`DEFAULT_PAGE_SIZE`], a non-positive page falls back
//! to the first page, and the offset is `(page - 1) * page_size`. No upper
//! bound is placed on the page size.
//!
//! # Example
//!
//! ```rust
//! use forum_service::repository::{FilterCondition, PageRequest, Pagination};
//!
//! let pagination = Pagination::from(PageRequest::new(3, 20));
//! assert_eq!(pagination.offset, 40);
//! assert_eq!(pagination.limit, 20);
//!
//! let filter = FilterCondition::contains("title", "hello");
//! assert_eq!(filter.bind_value(), "%hello%");
//! ```

use std::fmt;

/// Page size applied when the caller asks for zero or fewer rows
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page applied when the caller asks for page zero or below
pub const DEFAULT_PAGE: i64 = 1;

/// Direction for ordering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Sort in ascending order
    #[default]
    Ascending,
    /// Sort in descending order
    Descending,
}

impl OrderDirection {
    /// Map a caller's `descending` flag to a direction
    pub const fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// SQL keyword for the direction
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Page and page size exactly as the caller sent them
///
/// Values are not validated here; [`PageRequest::normalized`] applies the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: i64,
    /// Rows per page
    pub page_size: i64,
}

impl PageRequest {
    /// Create a page request
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Apply the default page and page size
    ///
    /// ```rust
    /// use forum_service::repository::PageRequest;
    ///
    /// assert_eq!(PageRequest::new(0, -5).normalized(), PageRequest::new(1, 10));
    /// assert_eq!(PageRequest::new(4, 3).normalized(), PageRequest::new(4, 3));
    /// ```
    #[must_use]
    pub const fn normalized(self) -> Self {
        let page = if self.page <= 0 { DEFAULT_PAGE } else { self.page };
        let page_size = if self.page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        };
        Self { page, page_size }
    }
}

/// Offset and limit appended to a listing statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of rows to skip
    pub offset: i64,
    /// Maximum number of rows to return
    pub limit: i64,
}

impl Pagination {
    /// Create pagination from a raw offset and limit
    #[must_use]
    pub const fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Pagination for a 1-indexed page, after applying the defaults
    ///
    /// The offset saturates instead of overflowing for absurd page numbers.
    #[must_use]
    pub const fn page(page_number: i64, page_size: i64) -> Self {
        let request = PageRequest::new(page_number, page_size).normalized();
        let offset = (request.page - 1).saturating_mul(request.page_size);
        Self {
            offset,
            limit: request.page_size,
        }
    }
}

impl From<PageRequest> for Pagination {
    fn from(request: PageRequest) -> Self {
        Self::page(request.page, request.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::page(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// How a filter compares its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Exact match (`=`), used for identifiers
    Equal,
    /// Case-insensitive substring match (`ILIKE '%value%'`), used for free text
    Contains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Contains => write!(f, "ILIKE"),
        }
    }
}

/// A single predicate appended to a listing statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    /// The column to filter on
    pub field: &'static str,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The caller's value, before any wildcard wrapping
    pub value: String,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: &'static str, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Create an equality filter (field = value)
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Equal, value)
    }

    /// Create a case-insensitive substring filter (field ILIKE %value%)
    pub fn contains(field: &'static str, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    /// The value bound to the placeholder
    ///
    /// `%` and `_` in the caller's value keep their pattern meaning.
    pub fn bind_value(&self) -> String {
        match self.operator {
            FilterOperator::Equal => self.value.clone(),
            FilterOperator::Contains => format!("%{}%", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction_from_descending() {
        assert_eq!(OrderDirection::from_descending(true), OrderDirection::Descending);
        assert_eq!(OrderDirection::from_descending(false), OrderDirection::Ascending);
        assert_eq!(OrderDirection::Descending.as_sql(), "DESC");
        assert_eq!(OrderDirection::Ascending.as_sql(), "ASC");
    }

    #[test]
    fn test_order_direction_display() {
        assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
        assert_eq!(format!("{}", OrderDirection::Descending), "desc");
    }

    #[test]
    fn test_page_request_normalization() {
        assert_eq!(PageRequest::new(0, 0).normalized(), PageRequest::new(1, 10));
        assert_eq!(PageRequest::new(-3, -1).normalized(), PageRequest::new(1, 10));
        assert_eq!(PageRequest::new(2, 0).normalized(), PageRequest::new(2, 10));
        assert_eq!(PageRequest::new(0, 25).normalized(), PageRequest::new(1, 25));
    }

    #[test]
    fn test_pagination_page() {
        let page1 = Pagination::page(1, 20);
        assert_eq!(page1, Pagination::new(0, 20));

        let page3 = Pagination::page(3, 20);
        assert_eq!(page3, Pagination::new(40, 20));
    }

    #[test]
    fn test_non_positive_page_size_matches_default() {
        assert_eq!(Pagination::page(2, 0), Pagination::page(2, 10));
        assert_eq!(Pagination::page(2, -7), Pagination::page(2, 10));
    }

    #[test]
    fn test_non_positive_page_matches_first_page() {
        assert_eq!(Pagination::page(0, 15), Pagination::page(1, 15));
        assert_eq!(Pagination::page(-9, 15), Pagination::page(1, 15));
    }

    #[test]
    fn test_page_size_has_no_upper_bound() {
        let pagination = Pagination::page(1, 1_000_000);
        assert_eq!(pagination.limit, 1_000_000);
    }

    #[test]
    fn test_pagination_offset_saturates() {
        let pagination = Pagination::page(i64::MAX, i64::MAX);
        assert_eq!(pagination.offset, i64::MAX);
    }

    #[test]
    fn test_pagination_default() {
        assert_eq!(Pagination::default(), Pagination::new(0, 10));
    }

    #[test]
    fn test_filter_operator_display() {
        assert_eq!(format!("{}", FilterOperator::Equal), "=");
        assert_eq!(format!("{}", FilterOperator::Contains), "ILIKE");
    }

    #[test]
    fn test_filter_bind_values() {
        assert_eq!(FilterCondition::eq("user_id", "u1").bind_value(), "u1");
        assert_eq!(FilterCondition::contains("name", "Rust").bind_value(), "%Rust%");
    }
}
