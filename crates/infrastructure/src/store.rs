use async_trait::async_trait;
use domain::{NewTask, Task, TaskId, TaskUpdate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Task not found")]
    NotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for tasks. Handlers hold this trait behind an
/// `Arc`, so any backing store can be swapped in without touching the
/// HTTP layer.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every stored task, ordered by id.
    async fn list_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Stores a new task with a fresh id and `completed = false`.
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError>;

    /// Applies the given fields to an existing task and returns the
    /// merged record. Fails with `NotFound` when the id is absent.
    async fn update_by_id(&self, id: &TaskId, update: TaskUpdate) -> Result<Task, StoreError>;

    /// Removes a task. Fails with `NotFound` when the id is absent, so
    /// a repeated delete is visible to the caller.
    async fn delete_by_id(&self, id: &TaskId) -> Result<(), StoreError>;
}
