//! Bookshelf API: CRUD REST backend for books on PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod secrets;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, VaultSettings};
pub use error::{AppError, ConfigError, StartupError};
pub use migration::apply_migrations;
pub use model::{Book, BookId, BookPayload};
pub use routes::{app, book_routes, common_routes, common_routes_with_ready};
pub use secrets::{AwsSecretSource, SecretError, SecretSource};
pub use service::{BookStore, PgBookStore};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, with_secret_password};
