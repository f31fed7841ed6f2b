//! Repository error types
//!
//! Every repository operation fails with a [`RepositoryError`]. Callers are
//! expected to branch on [`RepositoryError::kind`]: `NotFound` and
//! `ValidationFailed` are caller-recoverable, everything else is a store
//! failure reported as-is.
//!
//! # Example
//!
//! ```rust
//! use forum_service::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Tag", "tag_01h455vb4pex5vsknk084sn02q");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert!(!error.is_store_error());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Inserting a new row
    Create,
    /// Point lookup by key
    FindById,
    /// Partial update of an existing row
    Update,
    /// Marking a row deleted
    SoftDelete,
    /// Physically removing a row
    Delete,
    /// Filtered, paginated listing
    List,
    /// Ranked tag aggregate
    FamousTags,
    /// Posts joined through the post-tag table
    PostsByTag,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Update => write!(f, "update"),
            Self::SoftDelete => write!(f, "soft_delete"),
            Self::Delete => write!(f, "delete"),
            Self::List => write!(f, "list"),
            Self::FamousTags => write!(f, "famous_tags"),
            Self::PostsByTag => write!(f, "posts_by_tag"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No active row matched
    NotFound,
    /// The request was rejected before reaching the store
    ValidationFailed,
    /// Database constraint violation
    ConstraintViolation,
    /// Failed to reach the database or acquire a connection
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Any other failure reported by the store
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Post", "Tag")
    pub entity_type: Option<String>,
    /// The key of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    ///
    /// ```rust
    /// use forum_service::repository::RepositoryError;
    ///
    /// let error = RepositoryError::not_found("Post", "post_123");
    /// assert_eq!(error.entity_type, Some("Post".to_string()));
    /// ```
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::FindById,
            kind: RepositoryErrorKind::NotFound,
            message: "Entity not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ValidationFailed, message)
    }

    /// The update carried no field to set
    pub fn no_fields_provided(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::validation_failed(RepositoryOperation::Update, "no fields provided for update")
            .with_entity(entity_type, entity_id)
    }

    /// Create a constraint violation error
    pub fn constraint_violation(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindById,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a timeout error
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Create a database error
    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Add only the entity type, for errors not tied to a single key
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the error is a transient store condition
    ///
    /// Nothing in this crate retries; the flag is informational for callers.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }

    /// Whether the error came from the store rather than from the
    /// repository's own checks
    ///
    /// ```rust
    /// use forum_service::repository::{RepositoryError, RepositoryOperation};
    ///
    /// assert!(!RepositoryError::no_fields_provided("Tag", "tag_1").is_store_error());
    /// assert!(RepositoryError::database_error(RepositoryOperation::List, "syntax").is_store_error());
    /// ```
    pub fn is_store_error(&self) -> bool {
        !matches!(
            self.kind,
            RepositoryErrorKind::NotFound | RepositoryErrorKind::ValidationFailed
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        match (&self.entity_type, &self.entity_id) {
            (Some(entity_type), Some(entity_id)) => write!(f, " [{}: {}]", entity_type, entity_id)?,
            (Some(entity_type), None) => write!(f, " [{}]", entity_type)?,
            _ => {}
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
