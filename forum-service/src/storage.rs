//! Storage handle shared by the gRPC services

use sqlx::PgPool;

use crate::config::Config;
use crate::database;
use crate::error::Result;
use crate::repository::{
    CategoryRepository, CommentRepository, FieldPresence, PostRepository, PostTagRepository,
    TableRepository, TagRepository,
};

/// Owns the connection pool and hands out one repository per entity
///
/// Repositories are cheap clones sharing the same pool.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: PgPool,
    presence: FieldPresence,
}

impl Storage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            presence: FieldPresence::default(),
        }
    }

    #[must_use]
    pub fn with_presence(mut self, presence: FieldPresence) -> Self {
        self.presence = presence;
        self
    }

    /// Connect using the database settings, applying migrations if enabled
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = database::create_pool(&config.database).await?;
        if config.database.run_migrations {
            database::run_migrations(&pool).await?;
        }
        Ok(Self::new(pool).with_presence(config.repository.field_presence()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn categories(&self) -> CategoryRepository {
        self.repository()
    }

    pub fn tags(&self) -> TagRepository {
        self.repository()
    }

    pub fn posts(&self) -> PostRepository {
        self.repository()
    }

    pub fn comments(&self) -> CommentRepository {
        self.repository()
    }

    pub fn post_tags(&self) -> PostTagRepository {
        self.repository()
    }

    fn repository<R: crate::repository::Record>(&self) -> TableRepository<R> {
        TableRepository::new(self.pool.clone()).with_presence(self.presence)
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_repositories_inherit_presence() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://forum@localhost:5432/forum")
            .unwrap();
        let storage = Storage::new(pool).with_presence(FieldPresence::Explicit);

        assert_eq!(storage.tags().presence(), FieldPresence::Explicit);
        assert_eq!(storage.post_tags().presence(), FieldPresence::Explicit);
        assert_eq!(
            Storage::new(storage.pool().clone()).posts().presence(),
            FieldPresence::EmptyIsAbsent
        );
    }
}
