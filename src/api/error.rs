//! HTTP error responses and their mapping from crate errors.
//!
//! Every error reaches the client as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::TasklistError;

/// Messages shown to clients.
pub mod messages {
    pub const TODO_NOT_FOUND: &str = "Todo not found";
    pub const ROUTE_NOT_FOUND: &str = "Route not found";
    pub const TEXT_REQUIRED: &str = "Todo text is required";
    pub const TEXT_NOT_STRING: &str = "Todo text must be a non-empty string";
    pub const COMPLETED_NOT_BOOLEAN: &str = "Completed must be a boolean";
    pub const INVALID_JSON: &str = "Invalid JSON body";
    pub const INTERNAL: &str = "Something went wrong!";
    pub const DELETED: &str = "Todo deleted successfully";
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Details stay in the server log.
    #[error("Something went wrong!")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        ApiError::BadRequest(message.to_string())
    }

    pub fn todo_not_found() -> Self {
        ApiError::NotFound(messages::TODO_NOT_FOUND.to_string())
    }

    pub fn route_not_found() -> Self {
        ApiError::NotFound(messages::ROUTE_NOT_FOUND.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<TasklistError> for ApiError {
    fn from(err: TasklistError) -> Self {
        match err {
            TasklistError::NotFound(_) => ApiError::todo_not_found(),
            TasklistError::Validation(message) => ApiError::BadRequest(message),
            other => {
                tracing::error!(error = %other, "Unhandled error");
                ApiError::Internal
            }
        }
    }
}
