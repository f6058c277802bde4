use crate::config::Settings;
use crate::error::ApiError;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Duration;

pub type DatabasePool = Pool<Postgres>;

/// Connect and run migrations. Postgres is routinely still starting when the
/// service comes up under compose, so the connection is retried a bounded
/// number of times with linearly growing delays.
pub async fn create_connection_pool(settings: &Settings) -> Result<DatabasePool, ApiError> {
    let pool = connect_with_retry(
        &settings.database_url,
        settings.db_connect_attempts,
        settings.db_connect_retry_seconds,
    )
    .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn connect_with_retry(
    database_url: &str,
    max_attempts: u32,
    retry_seconds: f64,
) -> Result<DatabasePool, ApiError> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match sqlx::PgPool::connect(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "database connection failed, retrying"
                );
                let delay = retry_seconds * f64::from(attempt);
                tokio::time::sleep(Duration::from_secs_f64(delay)).await;
            }
            Err(e) => {
                tracing::error!(
                    attempts = max_attempts,
                    error = %e,
                    "database connection failed, giving up"
                );
                return Err(ApiError::Database(e));
            }
        }
    }
}

pub async fn health_check(pool: &DatabasePool) -> Result<(), ApiError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Run database migrations
static MIGRATIONS_RAN: OnceLock<()> = OnceLock::new();

pub async fn run_migrations(pool: &DatabasePool) -> Result<(), ApiError> {
    if MIGRATIONS_RAN.get().is_some() {
        return Ok(());
    }
    tracing::info!("Running database migrations...");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            tracing::info!("Database migrations completed successfully");
            let _ = MIGRATIONS_RAN.set(());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Database migration failed: {}", e);
            Err(ApiError::Database(e.into()))
        }
    }
}
