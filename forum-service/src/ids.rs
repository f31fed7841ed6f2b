//! Type-safe identifiers built on TypeIDs
//!
//! Entity ids are assigned by the service when a row is created and never
//! change afterwards. They combine a short prefix naming the entity with a
//! base32-encoded UUIDv7, so ids sort by creation time and a post id can never
//! be mistaken for a tag id in logs:
//!
//! ```rust
//! use forum_service::ids::{EntityId, EntityKind};
//!
//! let id = EntityId::new(EntityKind::Post);
//! assert!(id.as_str().starts_with("post_"));
//! ```
//!
//! Request ids use the same scheme with the `req` prefix and are attached to
//! gRPC metadata for log correlation.

use mti::prelude::*;
use std::fmt;
use std::str::FromStr;

/// The soft-deletable entities that carry a surrogate id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Tag,
    Post,
    Comment,
}

impl EntityKind {
    /// TypeID prefix for ids of this kind
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Category => "cat",
            Self::Tag => "tag",
            Self::Post => "post",
            Self::Comment => "cmt",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "cat" => Some(Self::Category),
            "tag" => Some(Self::Tag),
            "post" => Some(Self::Post),
            "cmt" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// Identifier of a category, tag, post or comment
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(MagicTypeId);

impl EntityId {
    /// Creates a fresh, time-sortable id for the given entity kind.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self(kind.prefix().create_type_id::<V7>())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The entity kind encoded in the prefix.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::from_prefix(self.0.prefix().as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mti = MagicTypeId::from_str(s).map_err(IdError::Parse)?;
        if EntityKind::from_prefix(mti.prefix().as_str()).is_none() {
            return Err(IdError::InvalidPrefix {
                expected: "cat|tag|post|cmt".to_string(),
                actual: mti.prefix().as_str().to_string(),
            });
        }
        Ok(Self(mti))
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0.to_string()
    }
}

/// A type-safe request identifier for log correlation.
///
/// Format: `req_<base32-encoded-uuidv7>`, e.g. `req_01h455vb4pex5vsknk084sn02q`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(MagicTypeId);

impl RequestId {
    /// The prefix used for request IDs
    pub const PREFIX: &'static str = "req";

    /// Creates a new request ID with a UUIDv7 (time-sortable).
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Returns the request ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the prefix portion of the ID.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.prefix().as_str()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mti = MagicTypeId::from_str(s).map_err(IdError::Parse)?;

        if mti.prefix().as_str() != Self::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: Self::PREFIX.to_string(),
                actual: mti.prefix().as_str().to_string(),
            });
        }

        Ok(Self(mti))
    }
}

/// Error type for id parsing.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The ID could not be parsed as a valid TypeID.
    #[error("failed to parse id: {0}")]
    Parse(#[from] MagicTypeIdError),

    /// The prefix was not the expected value.
    #[error("invalid prefix: expected '{expected}', got '{actual}'")]
    InvalidPrefix {
        /// The expected prefix.
        expected: String,
        /// The actual prefix found.
        actual: String,
    },
}
