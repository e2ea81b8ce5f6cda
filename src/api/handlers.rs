//! Request handlers for the todo REST API.
//!
//! Mutating handlers wait for the save attempt before responding. Reads
//! never wait on a pending save.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiError;
use super::params::{
    create_text, parse_body, parse_id, update_patch, DeleteResponse, HealthResponse,
};
use super::AppState;
use crate::entity::{timestamp_now, StoredTodo, TodoItem};
use crate::storage::TodoStats;

// ============================================================================
// Collection
// ============================================================================

/// `GET /api/todos`
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<StoredTodo>> {
    Json(state.store.list().await)
}

/// `POST /api/todos`
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let fields = parse_body(&body)?;
    let text = create_text(&fields)?;

    let todo = state.store.insert(text).await?;
    tracing::info!(id = todo.id, "Created todo");

    Ok((StatusCode::CREATED, Json(todo)))
}

// ============================================================================
// Single item
// ============================================================================

/// `PUT /api/todos/{id}`
///
/// An unknown id is reported before the body is validated.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<StoredTodo>, ApiError> {
    let fields = parse_body(&body)?;

    let id = parse_id(&raw_id).ok_or_else(ApiError::todo_not_found)?;
    if state.store.find_index_by_id(id).await.is_none() {
        return Err(ApiError::todo_not_found());
    }

    let patch = update_patch(&fields)?;
    let todo = state.store.update_by_id(id, patch).await?;
    tracing::info!(id, completed = todo.is_completed(), "Updated todo");

    Ok(Json(todo))
}

/// `DELETE /api/todos/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(ApiError::todo_not_found)?;

    let todo = state.store.remove_by_id(id).await?;
    tracing::info!(id, "Deleted todo");

    Ok(Json(DeleteResponse::new(todo)))
}

// ============================================================================
// Aggregates and service
// ============================================================================

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Json<TodoStats> {
    Json(state.store.stats().await)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: timestamp_now(),
        todos_count: state.store.len().await,
    })
}

/// Fallback for unknown paths and unsupported methods.
pub async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}
