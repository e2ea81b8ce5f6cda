//! HTTP server for the todo list.
//!
//! Exposes the store over a small JSON REST API:
//!
//! | Method & path             | Handler                  |
//! |---------------------------|--------------------------|
//! | `GET /api/todos`          | [`handlers::list_todos`] |
//! | `POST /api/todos`         | [`handlers::create_todo`]|
//! | `PUT /api/todos/{id}`     | [`handlers::update_todo`]|
//! | `DELETE /api/todos/{id}`  | [`handlers::delete_todo`]|
//! | `GET /api/stats`          | [`handlers::stats`]      |
//! | `GET /health`             | [`handlers::health`]     |

pub mod error;
pub mod handlers;
pub mod params;

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{Result, TasklistError};
use crate::storage::TodoStore;
use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The one todo store; it serializes its own mutations and saves.
    pub store: Arc<TodoStore>,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .route("/api/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "Request handler panicked");

    ApiError::Internal.into_response()
}

/// Load the store and serve the API until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let store = TodoStore::load(&config.data_file).await;
    let app = router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| TasklistError::Server(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(port = config.port, "Todo server running on port {}", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);
    tracing::info!("API endpoints:");
    tracing::info!("  GET    /api/todos     - Get all todos");
    tracing::info!("  POST   /api/todos     - Create todo");
    tracing::info!("  PUT    /api/todos/:id - Update todo");
    tracing::info!("  DELETE /api/todos/:id - Delete todo");
    tracing::info!("  GET    /api/stats     - Get statistics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Todo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
