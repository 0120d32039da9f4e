//! Book persistence against PostgreSQL.

use crate::error::AppError;
use crate::model::{Book, BookId, BookPayload};
use crate::sql::books as q;
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage seam used by the handlers. Every method performs a single statement.
/// Reads and writes only see live rows: a soft-deleted book is reported as absent.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, AppError>;

    async fn get(&self, id: BookId) -> Result<Option<Book>, AppError>;

    /// Insert and return the stored row with its assigned id.
    async fn create(&self, payload: BookPayload) -> Result<Book, AppError>;

    /// Replace all writable fields of `id`. `None` if no live row has that id.
    async fn update(&self, id: BookId, payload: BookPayload) -> Result<Option<Book>, AppError>;

    /// Soft-delete `id`. `false` if no live row has that id.
    async fn delete(&self, id: BookId) -> Result<bool, AppError>;

    /// Round trip to the backing store, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        tracing::debug!(sql = %q::SELECT_LIVE, "query");
        let rows = sqlx::query_as::<_, Book>(q::SELECT_LIVE)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, AppError> {
        tracing::debug!(sql = %q::SELECT_BY_ID, id, "query");
        let row = sqlx::query_as::<_, Book>(q::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, payload: BookPayload) -> Result<Book, AppError> {
        tracing::debug!(sql = %q::INSERT, payload = ?payload, "query");
        let row = sqlx::query_as::<_, Book>(q::INSERT)
            .bind(payload.book_name)
            .bind(payload.author)
            .bind(payload.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: BookId, payload: BookPayload) -> Result<Option<Book>, AppError> {
        tracing::debug!(sql = %q::UPDATE, id, payload = ?payload, "query");
        let row = sqlx::query_as::<_, Book>(q::UPDATE)
            .bind(id)
            .bind(payload.book_name)
            .bind(payload.author)
            .bind(payload.price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: BookId) -> Result<bool, AppError> {
        tracing::debug!(sql = %q::SOFT_DELETE, id, "query");
        let row: Option<(BookId,)> = sqlx::query_as(q::SOFT_DELETE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query(q::PING).fetch_optional(&self.pool).await?;
        Ok(())
    }
}
