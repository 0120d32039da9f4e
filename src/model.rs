//! Book row and request payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type BookId = i64;

/// A stored book. `deleted_at` is set once the book is soft-deleted; such rows are never served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    pub book_name: String,
    pub author: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Writable book fields as sent by clients. Omitted fields decode to their zero value;
/// `id` and audit fields in the body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPayload {
    pub book_name: String,
    pub author: String,
    pub price: f64,
}
