//! Shared application state for all routes. Built once at startup.

use crate::service::BookStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new<S: BookStore + 'static>(books: S) -> Self {
        Self {
            books: Arc::new(books),
        }
    }
}
