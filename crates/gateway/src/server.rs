//! HTTP surface for the task gateway.

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Task, TaskDraft};
use crate::store::SupabaseStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Persistence service client.
    pub store: SupabaseStore,
}

/// Build the HTTP router for the gateway.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Root connection check against the persistence service
        .route("/", get(connection_check))
        // Task resource
        .route("/tasks/", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/toggle", patch(toggle_task))
        // Liveness check (does not touch the persistence service)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root connection check: lists the table to prove the service is reachable.
async fn connection_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(json!({ "status": "Connected!", "data": tasks })))
}

/// Liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Create a new task; the persistence service assigns the id.
async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> Result<Json<Value>, ApiError> {
    let Some(task) = state.store.insert(&draft).await? else {
        return Err(ApiError::Internal("Failed to add task".to_string()));
    };

    info!(id = task.id, title = %task.title, "Task created");
    Ok(Json(json!({ "message": "Task added!", "task": task })))
}

/// List all tasks. An empty table is a success, never an error.
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// Fetch a single task by id.
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    match state.store.find(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound("Task not found".to_string())),
    }
}

/// Full replace of title and completed on an existing task.
///
/// A zero-row match is indistinguishable from "no changes made" at the
/// persistence layer; both map to the same not-found error.
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<TaskDraft>,
) -> Result<Json<Value>, ApiError> {
    let Some(task) = state.store.replace(id, &draft).await? else {
        return Err(ApiError::NotFound(
            "Task not found or no changes made".to_string(),
        ));
    };

    info!(id = task.id, "Task updated");
    Ok(Json(json!({ "message": "Task updated!", "task": task })))
}

/// Flip the completed flag of a task.
///
/// Two sequential round trips with no transaction between them: a
/// concurrent write to the same row between the read and the write is
/// last-write-wins on `completed`.
async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let Some(current) = state.store.completed_of(id).await? else {
        return Err(ApiError::NotFound("Task not found".to_string()));
    };

    let Some(task) = state.store.set_completed(id, !current).await? else {
        return Err(ApiError::Internal(
            "Failed to toggle task status".to_string(),
        ));
    };

    info!(id = task.id, completed = task.completed, "Task completion toggled");
    Ok(Json(json!({
        "message": "Task completion status toggled!",
        "task": task
    })))
}

/// Delete a task by id. Deleting a missing id is not-found, never a
/// silent success.
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete(id).await?.is_none() {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    info!(id, "Task deleted");
    Ok(Json(json!({ "message": "Task deleted successfully!" })))
}
