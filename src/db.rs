//! Connection provider: owns the PostgreSQL pool and hands out one connection per store operation.

use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const RESOURCES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS resources (
        id INT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        name VARCHAR NOT NULL
    )
"#;

/// Cheap to clone; every clone shares the same pool.
#[derive(Clone, Debug)]
pub struct ConnectionProvider {
    pool: PgPool,
}

impl ConnectionProvider {
    /// Open the pool and establish the first connection, so an unreachable host,
    /// bad credentials or a malformed connection string fail here rather than on the first request.
    pub async fn connect(connection_string: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(connection_string)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "unable to connect to database");
                AppError::Db(e)
            })?;
        Ok(ConnectionProvider { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        ConnectionProvider { pool }
    }

    /// Borrow one connection. It goes back to the pool when the handle is dropped,
    /// whichever way the caller returns.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        self.pool.acquire().await.map_err(AppError::Db)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Create the `resources` table if it does not exist yet.
    pub async fn seed(&self) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;
        sqlx::query(RESOURCES_DDL).execute(&mut *conn).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
