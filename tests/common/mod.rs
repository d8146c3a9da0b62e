//! Shared helpers: start the API in-process on an ephemeral port.

#![allow(dead_code)]

use std::sync::Arc;

use book_service::{transport, BookService, BookStore, SqliteBookStore};

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    server_handle: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app_with_store(store: Arc<dyn BookStore>) -> TestApp {
    let app_state = transport::http::AppState::new(BookService::new(store));
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts between tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        server_handle,
    }
}

/// API backed by a fresh in-memory SQLite store.
pub async fn spawn_app() -> TestApp {
    let store = SqliteBookStore::in_memory().await.unwrap();
    spawn_app_with_store(Arc::new(store)).await
}
