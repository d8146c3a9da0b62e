pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::book_service::BookService;
pub use domain::{Book, BookId, BookPatch, Lookup, NewBook};
pub use error::{BookError, BookResult};
pub use infra::config::AppConfig;
pub use storage::{BookStore, PostgresBookStore, SqliteBookStore};
