//! Book CRUD handlers: list, get, create, update, delete.

use crate::error::AppError;
use crate::model::{Book, BookId, BookPayload};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

pub const DELETED_MESSAGE: &str = "The book is deleted successfully!";

/// Path ids are plain decimal digits that fit in a `BookId`.
pub fn parse_id(id_str: &str) -> Result<BookId, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::invalid_id());
    }
    id_str.parse().map_err(|_| AppError::invalid_id())
}

/// Decode a request body as JSON whatever its content type. A `null` body is an empty payload.
pub fn decode_payload(body: &[u8]) -> Result<BookPayload, AppError> {
    serde_json::from_slice::<Option<BookPayload>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.books.list().await?;
    Ok(Json(books))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id_str)?;
    let book = state.books.get(id).await?.ok_or_else(AppError::book_not_found)?;
    Ok(Json(book))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Book>, AppError> {
    let payload = decode_payload(&body)?;
    let book = state.books.create(payload).await?;
    tracing::info!(id = book.id, "book created");
    Ok(Json(book))
}

/// Full replace: fields missing from the body are reset to their zero value.
/// The stored id always comes from the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id_str)?;
    if state.books.get(id).await?.is_none() {
        return Err(AppError::book_not_found());
    }
    let payload = decode_payload(&body)?;
    let book = state
        .books
        .update(id, payload)
        .await?
        .ok_or_else(AppError::book_not_found)?;
    tracing::info!(id, "book updated");
    Ok(Json(book))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let id = parse_id(&id_str)?;
    if !state.books.delete(id).await? {
        return Err(AppError::book_not_found());
    }
    tracing::info!(id, "book deleted");
    Ok(Json(DELETED_MESSAGE))
}
