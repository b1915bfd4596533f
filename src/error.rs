use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid board shape: {0}")]
    InvalidBoardShape(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejections raised at the form boundary, before anything reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a title to save.")]
    EmptyTitle,

    #[error("Enter the assignee.")]
    EmptyAssignee,
}
