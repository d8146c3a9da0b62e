//! Key-addressed persistence for books.
//!
//! The service only ever talks to a `BookStore`; which relational backend sits
//! behind it is decided once at startup from the database URL.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookPatch, NewBook};
use crate::error::{BookError, BookResult};

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresBookStore;
pub use sqlite::SqliteBookStore;

/// Column list shared by every `SELECT`/`RETURNING` clause.
pub(crate) const BOOK_COLUMNS: &str = "book_id, title, author, description, created_at, updated_at";

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns the book stored under `book_id`, if any.
    async fn find_by_key(&self, book_id: BookId) -> BookResult<Option<Book>>;

    /// Returns every stored book, ordered by identity.
    async fn find_all(&self) -> BookResult<Vec<Book>>;

    /// Inserts a new row. Constraint violations (duplicate key, missing
    /// required column) surface as `BookError::Rejected`.
    async fn insert(&self, book: NewBook) -> BookResult<Book>;

    /// Overwrites the fields present in `patch`. `None` if no row matched.
    async fn update_by_key(&self, book_id: BookId, patch: BookPatch) -> BookResult<Option<Book>>;

    /// Deletes the row under `book_id` and returns the number of rows removed.
    async fn delete_by_key(&self, book_id: BookId) -> BookResult<u64>;

    /// Round-trips a trivial query to check the store is reachable.
    async fn ping(&self) -> BookResult<()>;
}

/// Opens a store for `database_url`, creating the `books` table if needed.
///
/// `postgres://` / `postgresql://` URLs select Postgres, `sqlite:` URLs select SQLite.
pub async fn connect(database_url: &str, max_connections: u32) -> BookResult<Arc<dyn BookStore>> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        let store = PostgresBookStore::connect(database_url, max_connections).await?;
        Ok(Arc::new(store))
    } else if database_url.starts_with("sqlite:") {
        let store = SqliteBookStore::connect(database_url, max_connections).await?;
        Ok(Arc::new(store))
    } else {
        let scheme = database_url.split(':').next().unwrap_or_default();
        Err(BookError::UnsupportedDatabase(scheme.to_string()))
    }
}
