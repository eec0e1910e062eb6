//! Resource store: parameterized SQL over one pooled connection per operation.

use crate::db::ConnectionProvider;
use crate::error::AppError;
use crate::model::{Resource, ResourcePayload};
use async_trait::async_trait;

/// Data access used by the HTTP layer. Object safe so handlers hold `Arc<dyn ResourceRepository>`.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Insert a resource and return the id the store assigned.
    async fn create(&self, payload: &ResourcePayload) -> Result<i32, AppError>;

    /// Fetch one resource. Zero rows is `AppError::NotFound`.
    async fn read(&self, id: i32) -> Result<Resource, AppError>;

    /// Fetch every resource ordered by id. Zero rows is an empty vector.
    async fn read_all(&self) -> Result<Vec<Resource>, AppError>;

    /// Rename a resource. An unknown id is not reported.
    async fn update(&self, id: i32, payload: &ResourcePayload) -> Result<(), AppError>;

    /// Remove a resource. An unknown id is not reported.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

pub struct PgResourceStore {
    provider: ConnectionProvider,
}

impl PgResourceStore {
    pub fn new(provider: ConnectionProvider) -> Self {
        PgResourceStore { provider }
    }
}

#[async_trait]
impl ResourceRepository for PgResourceStore {
    async fn create(&self, payload: &ResourcePayload) -> Result<i32, AppError> {
        let mut conn = self.provider.acquire().await?;
        let (id,): (i32,) = sqlx::query_as("INSERT INTO resources (name) VALUES ($1) RETURNING id")
            .bind(&payload.name)
            .fetch_one(&mut *conn)
            .await?;
        tracing::debug!(id, "resource created");
        Ok(id)
    }

    async fn read(&self, id: i32) -> Result<Resource, AppError> {
        let mut conn = self.provider.acquire().await?;
        sqlx::query_as::<_, Resource>("SELECT id, name FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("resource {} not found", id)))
    }

    async fn read_all(&self) -> Result<Vec<Resource>, AppError> {
        let mut conn = self.provider.acquire().await?;
        let rows = sqlx::query_as::<_, Resource>("SELECT id, name FROM resources ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i32, payload: &ResourcePayload) -> Result<(), AppError> {
        let mut conn = self.provider.acquire().await?;
        sqlx::query("UPDATE resources SET name = $1 WHERE id = $2")
            .bind(&payload.name)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut conn = self.provider.acquire().await?;
        sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
