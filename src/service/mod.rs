//! Book persistence behind the `BookStore` trait.

mod books;
pub use books::{BookStore, PgBookStore};
