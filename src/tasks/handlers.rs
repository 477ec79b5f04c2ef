use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    response::Envelope,
    state::AppState,
    tasks::{
        dto::{CreateTaskRequest, TaskQuery, UpdateTaskRequest},
        filter::TaskFilter,
        repo::{self, Category, NewTask, Priority, Status, Task, TaskPatch},
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Envelope<Vec<Task>>>, ApiError> {
    let filter = TaskFilter::from_query(user_id, &query);
    let tasks = repo::find(&state.db, &filter).await?;
    Ok(Json(Envelope::data(tasks)))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Envelope<Task>>), ApiError> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        warn!("missing title");
        return Err(ApiError::Validation("Title is required".into()));
    }

    let new = NewTask {
        title,
        description: payload.description,
        category: payload.category.unwrap_or(Category::Other),
        priority: payload.priority.unwrap_or(Priority::Medium),
        status: payload.status.unwrap_or(Status::Pending),
        due_date: payload.due_date,
    };
    let task = repo::create(&state.db, user_id, new).await?;

    info!(task_id = %task.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Task created", task)),
    ))
}

#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Task>>, ApiError> {
    let task = repo::find_by_id(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Task not found"))?;
    Ok(Json(Envelope::data(task)))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Envelope<Task>>, ApiError> {
    if let Some(title) = payload.title.as_deref() {
        if title.trim().is_empty() {
            warn!(task_id = %id, "blank title in patch");
            return Err(ApiError::Validation("Title cannot be empty".into()));
        }
    }

    let patch = TaskPatch {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        priority: payload.priority,
        status: payload.status,
        due_date: payload.due_date,
    };
    let task = repo::update(&state.db, user_id, id, patch)
        .await?
        .ok_or(ApiError::NotFound("Task not found"))?;

    info!(task_id = %task.id, "task updated");
    Ok(Json(Envelope::with_message("Task updated", task)))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Task not found"));
    }

    info!(task_id = %id, "task deleted");
    Ok(Json(Envelope::message("Task deleted")))
}
