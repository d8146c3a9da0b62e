use crate::domain::{Book, BookPatch};
use crate::transport::http::handlers::{books, health};
use crate::transport::http::types::{AppState, CreateBookRequest, HealthResponse, MessageBody};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub const API_BASE_PATH: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        books::get_books_handler,
        books::get_book_handler,
        books::save_book_handler,
        books::update_book_handler,
        books::delete_book_handler
    ),
    components(schemas(Book, BookPatch, CreateBookRequest, MessageBody, HealthResponse))
)]
pub struct ApiDoc;

fn book_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(books::get_books_handler).post(books::save_book_handler),
        )
        .route(
            "/books/:book_id",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .nest(API_BASE_PATH, book_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
