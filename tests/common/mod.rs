#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf_api::{app, AppError, AppState, Book, BookId, BookPayload, BookStore};
use chrono::Utc;
use std::sync::Mutex;
use tower::ServiceExt;

/// In-memory store with the same soft-delete visibility as the Postgres one.
#[derive(Default)]
pub struct MemoryBookStore {
    rows: Mutex<Vec<Book>>,
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|b| b.deleted_at.is_none()).cloned().collect())
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, payload: BookPayload) -> Result<Book, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let book = Book {
            id: rows.len() as BookId + 1,
            book_name: payload.book_name,
            author: payload.author,
            price: payload.price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: BookId, payload: BookPayload) -> Result<Option<Book>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .map(|b| {
                b.book_name = payload.book_name;
                b.author = payload.author;
                b.price = payload.price;
                b.updated_at = Utc::now();
                b.clone()
            }))
    }

    async fn delete(&self, id: BookId) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|b| b.id == id && b.deleted_at.is_none()) {
            Some(b) => {
                b.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails the way a lost database connection does.
pub struct BrokenBookStore;

#[async_trait]
impl BookStore for BrokenBookStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: BookId) -> Result<Option<Book>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _payload: BookPayload) -> Result<Book, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: BookId, _payload: BookPayload) -> Result<Option<Book>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: BookId) -> Result<bool, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn memory_app() -> Router {
    app(AppState::new(MemoryBookStore::default()), BODY_LIMIT)
}

pub fn broken_app() -> Router {
    app(AppState::new(BrokenBookStore), BODY_LIMIT)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn book(&self) -> Book {
        serde_json::from_slice(&self.body).expect("response body is a book")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    match body {
        Some(b) => send_with_content_type(app, method, uri, Some("application/json"), b).await,
        None => dispatch(app, Request::builder().method(method).uri(uri), Body::empty()).await,
    }
}

/// Send `body` with the given content type, or with no content type header at all.
pub async fn send_with_content_type(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    dispatch(app, builder, Body::from(body.to_string())).await
}

async fn dispatch(app: &Router, builder: axum::http::request::Builder, body: Body) -> TestResponse {
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse {
        status,
        content_type,
        body,
    }
}

pub async fn create_book(app: &Router, body: &str) -> Book {
    let res = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(res.status, StatusCode::OK, "create failed: {}", res.text());
    res.book()
}
