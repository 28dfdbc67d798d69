use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Task title is required")]
    MissingTitle,

    #[error("Title must contain at least 3 characters")]
    TitleTooShort,

    #[error("Invalid task ID: {0}")]
    InvalidTaskId(String),

    #[error("At least one of 'title' or 'completed' is required")]
    EmptyUpdate,
}

pub type DomainResult<T> = Result<T, DomainError>;
