//! Book store backed by PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{BookStore, BOOK_COLUMNS};
use crate::domain::{Book, BookId, BookPatch, NewBook};
use crate::error::BookResult;

#[derive(Clone)]
pub struct PostgresBookStore {
    pool: PgPool,
}

impl PostgresBookStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> BookResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> BookResult<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                book_id BIGINT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                description TEXT,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl BookStore for PostgresBookStore {
    async fn find_by_key(&self, book_id: BookId) -> BookResult<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE book_id = $1", BOOK_COLUMNS);
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
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            BOOK_COLUMNS
        );
        let stored = sqlx::query_as::<_, Book>(&sql)
            .bind(book.book_id)
            .bind(book.title)
            .bind(book.author)
            .bind(book.description)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_by_key(&self, book_id: BookId, patch: BookPatch) -> BookResult<Option<Book>> {
        let sql = format!(
            "UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                description = COALESCE($4, description),
                updated_at = $5
             WHERE book_id = $1
             RETURNING {}",
            BOOK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Book>(&sql)
            .bind(book_id)
            .bind(patch.title)
            .bind(patch.author)
            .bind(patch.description)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_by_key(&self, book_id: BookId) -> BookResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = $1")
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
