//! Database connection pool management

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{sanitize_url, DatabaseError, Error, Result};

/// Create a PostgreSQL connection pool, retrying with exponential backoff
///
/// Makes `max_retries + 1` attempts in total, doubling the delay after each
/// failure starting from `retry_delay_secs`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Database connection pool created: max={}, min={}",
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = backoff_delay(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    crate::MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

async fn try_create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            let category = categorize_db_error(&e);
            Error::Database(
                DatabaseError::from(e)
                    .add_context(format!("{} ({})", sanitize_url(&config.url), category)),
            )
        })
}

/// Categorize database error for better operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "configuration error",
        Error::Database(_) => "server rejected the connection",
        Error::Io(_) => "network I/O error, check connectivity",
        Error::Tls(_) => "TLS error, check certificate configuration",
        Error::PoolTimedOut => "pool timeout, database may be overloaded",
        Error::PoolClosed => "pool closed",
        Error::WorkerCrashed => "database worker crashed",
        _ => "connection error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseErrorKind;

    #[test]
    fn test_backoff_doubles() {
        let base = Duration::from_secs(2);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let delay = backoff_delay(Duration::from_secs(u64::MAX / 2), 40);
        assert_eq!(delay, Duration::MAX);
    }

    #[test]
    fn test_categorize_db_error() {
        assert_eq!(
            categorize_db_error(&sqlx::Error::PoolTimedOut),
            "pool timeout, database may be overloaded"
        );
        assert_eq!(categorize_db_error(&sqlx::Error::RowNotFound), "connection error");
    }

    #[tokio::test]
    async fn test_unparseable_url_fails_without_leaking_credentials() {
        let config = DatabaseConfig {
            url: "postgres://forum:secret@[not-an-address".to_string(),
            max_connections: 1,
            min_connections: 0,
            connection_timeout_secs: 1,
            max_retries: 0,
            retry_delay_secs: 0,
            run_migrations: false,
        };

        match create_pool(&config).await {
            Err(Error::Database(err)) => {
                assert_eq!(err.kind, DatabaseErrorKind::Configuration);
                assert!(!err.message.contains("secret"));
                let context = err.context.unwrap_or_default();
                assert!(!context.contains("secret"));
            }
            other => panic!("expected a database error, got {:?}", other.map(|_| ())),
        }
    }
}
