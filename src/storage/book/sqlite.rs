//! Book store backed by SQLite. `sqlite::memory:` gives a throwaway store for
//! local runs and tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::{BookStore, BOOK_COLUMNS};
use crate::domain::{Book, BookId, BookPatch, NewBook};
use crate::error::BookResult;

#[derive(Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> BookResult<Self> {
        // Every connection to `:memory:` opens its own database, so an in-memory
        // store must stay on one connection that is never recycled.
        let in_memory = database_url.contains(":memory:");
        let options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = options.connect(database_url).await?;
        Self::new_with_pool(pool).await
    }

    /// Opens a fresh, empty in-memory store.
    pub async fn in_memory() -> BookResult<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    pub async fn new_with_pool(pool: SqlitePool) -> BookResult<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                book_id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn find_by_key(&self, book_id: BookId) -> BookResult<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE book_id = ?", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_all(&self) -> BookResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM books ORDER BY book_id", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    async fn insert(&self, book: NewBook) -> BookResult<Book> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO books (book_id, title, author, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            BOOK_COLUMNS
        );
        let stored = sqlx::query_as::<_, Book>(&sql)
            .bind(book.book_id)
            .bind(book.title)
            .bind(book.author)
            .bind(book.description)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_by_key(&self, book_id: BookId, patch: BookPatch) -> BookResult<Option<Book>> {
        let sql = format!(
            "UPDATE books SET
                title = COALESCE(?, title),
                author = COALESCE(?, author),
                description = COALESCE(?, description),
                updated_at = ?
             WHERE book_id = ?
             RETURNING {}",
            BOOK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Book>(&sql)
            .bind(patch.title)
            .bind(patch.author)
            .bind(patch.description)
            .bind(Utc::now())
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_by_key(&self, book_id: BookId) -> BookResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = ?")
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> BookResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
