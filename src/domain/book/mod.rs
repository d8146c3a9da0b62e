//! The `Book` entity and the value types that flow between the controller,
//! the service and the store adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::error::BookResult;

pub mod identity;

/// Client-supplied primary identity of a book.
pub type BookId = i64;

/// A book as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a book. Absent fields are left untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookPatch {
    /// Decodes the editable fields out of a raw request body. Unknown keys
    /// (including `bookId`) are ignored.
    pub fn from_body(body: JsonValue) -> BookResult<Self> {
        Ok(serde_json::from_value(body)?)
    }
}

/// Insert payload. `title` and `author` stay optional here; the store's
/// NOT NULL constraints are what reject a book without them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub book_id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl NewBook {
    pub fn new(book_id: BookId, fields: BookPatch) -> Self {
        Self {
            book_id,
            title: fields.title,
            author: fields.author,
            description: fields.description,
        }
    }
}

/// Outcome of a keyed lookup. Absence is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let book = Book {
            book_id: 56,
            title: "Fantastic Mr. Fox".to_string(),
            author: "Roald Dahl".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["bookId"], json!(56));
        assert_eq!(value["title"], json!("Fantastic Mr. Fox"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("book_id").is_none());
    }

    #[test]
    fn patch_ignores_unknown_and_missing_fields() {
        let patch = BookPatch::from_body(json!({ "bookId": 4.0, "title": "New" })).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.author.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn patch_rejects_wrongly_typed_fields() {
        let err = BookPatch::from_body(json!({ "title": 12 })).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn lookup_from_option() {
        assert_eq!(Lookup::from(Some(1)), Lookup::Found(1));
        assert!(!Lookup::<i32>::from(None).is_found());
    }
}
