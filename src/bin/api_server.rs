// src/bin/api_server.rs

use book_service::app::seed::populate_dummy_data;
use book_service::infra::config::Environment;
use book_service::infra::logging::init_tracing;
use book_service::{storage, transport, AppConfig, BookService};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing()?;

    info!(environment = config.environment.as_str(), "starting book service");

    // --- Store Initialization ---
    let store = storage::connect(&config.database_url, config.max_connections).await?;
    let book_service = BookService::new(store);
    info!("book store ready");

    if config.environment == Environment::Dev {
        if let Err(e) = populate_dummy_data(&book_service).await {
            error!(error = %e, "seeding dummy data failed");
        }
    }

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(book_service);
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
