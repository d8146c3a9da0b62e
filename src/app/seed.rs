//! Dummy data loaded into the store when running in the `dev` environment.

use tracing::{info, warn};

use crate::app::book_service::BookService;
use crate::domain::{BookPatch, NewBook};
use crate::error::BookResult;

fn dummy_books() -> Vec<NewBook> {
    vec![
        NewBook::new(
            1,
            BookPatch {
                title: Some("The Hobbit".to_string()),
                author: Some("J. R. R. Tolkien".to_string()),
                description: Some(
                    "Someone finds a nice piece of jewellery while on holiday.".to_string(),
                ),
            },
        ),
        NewBook::new(
            2,
            BookPatch {
                title: Some("The Shop Before Life".to_string()),
                author: Some("Neil Hughes".to_string()),
                description: Some(
                    "Before being born, each person must visit the magical Shop Before Life, \
                     where they choose what kind of person they will become down on Earth..."
                        .to_string(),
                ),
            },
        ),
    ]
}

/// Inserts the dummy books that are not already present. Returns how many
/// were inserted; existing rows are left alone so restarts are harmless.
pub async fn populate_dummy_data(service: &BookService) -> BookResult<usize> {
    let mut inserted = 0;
    for book in dummy_books() {
        let book_id = book.book_id;
        if service.get_by_key(book_id).await?.is_found() {
            continue;
        }
        match service.create(book).await {
            Ok(_) => inserted += 1,
            Err(e) => warn!(book_id, error = %e, "failed to seed book"),
        }
    }
    info!(inserted, "dummy data populated");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteBookStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = SqliteBookStore::in_memory().await.unwrap();
        let service = BookService::new(Arc::new(store));

        assert_eq!(populate_dummy_data(&service).await.unwrap(), 2);
        assert_eq!(populate_dummy_data(&service).await.unwrap(), 0);
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }
}
