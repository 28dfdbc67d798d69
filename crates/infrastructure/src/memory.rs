use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use domain::{NewTask, Task, TaskId, TaskUpdate};

use crate::store::{StoreError, TaskStore};

/// In-process store backed by an ordered map, used for tests and local
/// development. Iteration follows id order, matching the DynamoDB
/// store's sort-key order.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<BTreeMap<TaskId, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.values().cloned().collect())
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: TaskId::new(),
            title: new_task.into_title(),
            completed: false,
        };
        let mut tasks = self.tasks.lock().unwrap();
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update_by_id(&self, id: &TaskId, update: TaskUpdate) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks.get_mut(id).ok_or(StoreError::NotFound)?;
        if let Some(title) = update.title() {
            task.title = title.to_string();
        }
        if let Some(completed) = update.completed() {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
