use thiserror::Error;

#[derive(Error, Debug)]
pub enum TasklistError {
    #[error("Todo not found: {0}")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TasklistError>;
