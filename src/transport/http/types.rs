use crate::app::book_service::BookService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub book_service: BookService,
}

impl AppState {
    pub fn new(book_service: BookService) -> Self {
        Self { book_service }
    }
}

/// Error body used where the failure carries an underlying error text.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Request body for `POST /api/v1/books`. Only `bookId` is checked before the
/// write; `title` and `author` are enforced by the store.
///
/// Used only for the OpenAPI schema: the handler reads the raw JSON so it can
/// validate `bookId` itself, so the fields are never read in Rust.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateBookRequest {
    /// Positive integer identity chosen by the client.
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
