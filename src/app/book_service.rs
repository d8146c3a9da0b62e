//! The book service.
//!
//! A thin, persistence-facing layer over an injected `BookStore`. It applies no
//! validation or business rules; deciding what an outcome means for the
//! client is the HTTP layer's job.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{Book, BookId, BookPatch, Lookup, NewBook};
use crate::error::BookResult;
use crate::storage::BookStore;

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books, in the store's order.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> BookResult<Vec<Book>> {
        let books = self.store.find_all().await?;
        debug!(count = books.len(), "listed books");
        Ok(books)
    }

    #[instrument(skip(self))]
    pub async fn get_by_key(&self, book_id: BookId) -> BookResult<Lookup<Book>> {
        Ok(self.store.find_by_key(book_id).await?.into())
    }

    /// Persists a new book. Store rejections are returned to the caller as-is.
    #[instrument(skip(self, book), fields(book_id = book.book_id))]
    pub async fn create(&self, book: NewBook) -> BookResult<Book> {
        let stored = self.store.insert(book).await?;
        debug!("book created");
        Ok(stored)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, book_id: BookId, patch: BookPatch) -> BookResult<Lookup<Book>> {
        Ok(self.store.update_by_key(book_id, patch).await?.into())
    }

    /// Number of rows removed: 1 if the book existed, 0 otherwise.
    #[instrument(skip(self))]
    pub async fn delete_by_key(&self, book_id: BookId) -> BookResult<u64> {
        let removed = self.store.delete_by_key(book_id).await?;
        debug!(removed, "delete finished");
        Ok(removed)
    }

    pub async fn ping(&self) -> BookResult<()> {
        self.store.ping().await
    }
}
