//! Domain model for the book resource.

pub mod book;

pub use book::{Book, BookId, BookPatch, Lookup, NewBook};
