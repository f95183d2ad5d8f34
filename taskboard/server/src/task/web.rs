use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::schemas::{CreateTask, UpdateTask};
use crate::task::{Task, TaskService, TaskServiceError};
use crate::web::api::{
    ApiError, ErrorResponse, TASK_NOT_FOUND, TransactionResponse, USER_NOT_FOUND,
};

#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Query string identifying a single task.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskIdQuery {
    /// ID of the task
    task_id: i32,
}

/// Query string naming the owner of a new task.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    /// ID of the user that will own the task
    user_id: i32,
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::UserNotFound(_) => ApiError::NotFound(USER_NOT_FOUND),
            TaskServiceError::NotFound(_) => ApiError::NotFound(TASK_NOT_FOUND),
            TaskServiceError::Database(db_err) => ApiError::Database(db_err),
        }
    }
}

/// Handler for GET /task/ - Returns every task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/task/",
    responses(
        (status = 200, description = "All tasks", body = [Task]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "task"
)]
pub async fn all_tasks_handler(
    State(state): State<TaskState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskService::new(&state.db).get_all_tasks().await?;
    Ok(Json(tasks))
}

/// Handler for GET /task/task_id - Returns one task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/task/task_id",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "The requested task", body = Task),
        (status = 404, description = "Task was not found", body = ErrorResponse)
    ),
    tag = "task"
)]
pub async fn task_by_id_handler(
    State(state): State<TaskState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Json<Task>, ApiError> {
    let task = TaskService::new(&state.db)
        .get_task_by_id(query.task_id)
        .await?;
    Ok(Json(task))
}

/// Handler for POST /task/create.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/task/create",
    params(OwnerQuery),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = TransactionResponse),
        (status = 404, description = "User was not found", body = ErrorResponse)
    ),
    tag = "task"
)]
pub async fn create_task_handler(
    State(state): State<TaskState>,
    Query(query): Query<OwnerQuery>,
    Json(payload): Json<CreateTask>,
) -> Result<TransactionResponse, ApiError> {
    TaskService::new(&state.db)
        .create_task(query.user_id, payload)
        .await?;
    Ok(TransactionResponse::new(StatusCode::CREATED, "Successful"))
}

/// Handler for PUT /task/update.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/task/update",
    params(TaskIdQuery),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = TransactionResponse),
        (status = 404, description = "Task was not found", body = ErrorResponse)
    ),
    tag = "task"
)]
pub async fn update_task_handler(
    State(state): State<TaskState>,
    Query(query): Query<TaskIdQuery>,
    Json(payload): Json<UpdateTask>,
) -> Result<TransactionResponse, ApiError> {
    TaskService::new(&state.db)
        .update_task(query.task_id, payload)
        .await?;
    Ok(TransactionResponse::new(
        StatusCode::OK,
        "Task update is successful!",
    ))
}

/// Handler for DELETE /task/delete.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/task/delete",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "Task deleted", body = TransactionResponse),
        (status = 404, description = "Task was not found", body = ErrorResponse)
    ),
    tag = "task"
)]
pub async fn delete_task_handler(
    State(state): State<TaskState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<TransactionResponse, ApiError> {
    TaskService::new(&state.db).delete_task(query.task_id).await?;
    Ok(TransactionResponse::new(StatusCode::OK, "Task deleted!"))
}

/// Creates and returns the task router with all task-related routes.
pub fn create_task_router(state: TaskState) -> Router {
    Router::new()
        .route("/task/", get(all_tasks_handler))
        .route("/task/task_id", get(task_by_id_handler))
        .route("/task/create", post(create_task_handler))
        .route("/task/update", put(update_task_handler))
        .route("/task/delete", delete(delete_task_handler))
        .with_state(state)
}
