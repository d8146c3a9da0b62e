//! Book endpoints under `/api/v1/books`.
//!
//! Validation of client-supplied identities and the mapping of service
//! outcomes to status codes live here; the service itself never decides what
//! a client sees.

use crate::domain::book::identity::{leading_integer, numeric_key, positive_book_id, LeadingInteger};
use crate::domain::{Book, BookPatch, Lookup, NewBook};
use crate::transport::http::handlers::common::{json_body_or_empty, ApiError};
use crate::transport::http::types::{AppState, CreateBookRequest, MessageBody};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

pub const NOT_FOUND: &str = "Not found";
pub const INVALID_BOOK_ID: &str = "The Book ID needs to be a positive integer.";
pub const DUPLICATE_BOOK_ID: &str = "A book with that ID already exists.";
pub const NON_NUMERIC_BOOK_ID: &str = "Invalid book ID - must be a number";
pub const BOOK_NOT_FOUND: &str = "Book not found";

#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "All books, possibly empty", body = [Book]),
        (status = 500, description = "Store failure", body = MessageBody)
    )
)]
pub async fn get_books_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let books = state.book_service.get_all().await?;
    Ok((StatusCode::OK, Json(books)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{bookId}",
    params(
        ("bookId" = String, Path, description = "Book identity")
    ),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No book with that identity", body = String)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    // Fractional or non-numeric identities cannot match any stored book.
    let Some(book_id) = numeric_key(&raw_id) else {
        return Err(ApiError::Plain(StatusCode::NOT_FOUND, NOT_FOUND));
    };

    match state.book_service.get_by_key(book_id).await? {
        Lookup::Found(book) => Ok((StatusCode::OK, Json(book)).into_response()),
        Lookup::NotFound => Err(ApiError::Plain(StatusCode::NOT_FOUND, NOT_FOUND)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid identity, duplicate identity or rejected write", body = MessageBody)
    )
)]
pub async fn save_book_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = json_body_or_empty(&headers, &body)?;

    let book_id = positive_book_id(body.get("bookId"))
        .ok_or(ApiError::Plain(StatusCode::BAD_REQUEST, INVALID_BOOK_ID))?;

    // Check-then-insert is not atomic; a racing insert is caught by the
    // primary key and reported as a rejected write below.
    if state.book_service.get_by_key(book_id).await?.is_found() {
        return Err(ApiError::Plain(StatusCode::BAD_REQUEST, DUPLICATE_BOOK_ID));
    }

    let fields = BookPatch::from_body(body).map_err(ApiError::rejected_write)?;
    let created = state
        .book_service
        .create(NewBook::new(book_id, fields))
        .await
        .map_err(|e| {
            warn!(book_id, error = %e, "book rejected");
            ApiError::rejected_write(e)
        })?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{bookId}",
    params(
        ("bookId" = String, Path, description = "Book identity")
    ),
    request_body = BookPatch,
    responses(
        (status = 204, description = "Update applied (or nothing matched)"),
        (status = 400, description = "Body is malformed JSON or a field has the wrong type", body = MessageBody)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let body = json_body_or_empty(&headers, &body)?;
    let patch = BookPatch::from_body(body).map_err(ApiError::rejected_write)?;

    // An identity that cannot be a key matches nothing.
    let LeadingInteger::Key(book_id) = leading_integer(&raw_id) else {
        debug!(raw_id = %raw_id, "update with unmatchable identity ignored");
        return Ok(StatusCode::NO_CONTENT);
    };

    if !state.book_service.update(book_id, patch).await?.is_found() {
        debug!(book_id, "update matched no book");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{bookId}",
    params(
        ("bookId" = String, Path, description = "Book identity")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Identity is not a number", body = String),
        (status = 404, description = "No book with that identity", body = String)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let book_id = match leading_integer(&raw_id) {
        LeadingInteger::Key(id) => id,
        LeadingInteger::OutOfRange => return Err(ApiError::Plain(StatusCode::NOT_FOUND, BOOK_NOT_FOUND)),
        LeadingInteger::NotANumber => {
            return Err(ApiError::Plain(StatusCode::BAD_REQUEST, NON_NUMERIC_BOOK_ID))
        }
    };

    match state.book_service.delete_by_key(book_id).await? {
        0 => Err(ApiError::Plain(StatusCode::NOT_FOUND, BOOK_NOT_FOUND)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
