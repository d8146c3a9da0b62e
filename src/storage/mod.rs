pub mod book;

pub use book::{connect, BookStore, PostgresBookStore, SqliteBookStore};
