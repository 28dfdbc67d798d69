use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domain::{NewTask, Task, TaskId, TaskUpdate};

use crate::error::ApiError;
use crate::models::{CreateTaskRequest, DeletedResponse, HealthResponse, UpdateTaskRequest};
use crate::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list_all().await?;
    tracing::info!(count = tasks.len(), "listed tasks");
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(body) = payload?;
    let new_task = NewTask::new(body.title)?;

    let task = state.store.insert(new_task).await?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId::parse(&id)?;
    let Json(body) = payload?;
    let update = TaskUpdate::new(body.title, body.completed)?;

    let task = state.store.update_by_id(&id, update).await?;
    tracing::info!(id = %task.id, completed = task.completed, "task updated");
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = TaskId::parse(&id)?;

    state.store.delete_by_id(&id).await?;
    tracing::info!(%id, "task deleted");
    Ok(Json(DeletedResponse { message: "deleted" }))
}
