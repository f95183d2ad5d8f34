use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::schemas::{CreateTask, CreateUser, UpdateTask, UpdateUser};
use crate::task::Task;
use crate::user::User;

/// Detail returned when a user lookup comes back empty.
pub const USER_NOT_FOUND: &str = "User was not found";
/// Detail returned when a task lookup comes back empty.
pub const TASK_NOT_FOUND: &str = "Not found";

/// Envelope returned by every successful write.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransactionResponse {
    /// HTTP status code of the response, repeated in the body
    pub status_code: u16,
    /// Human readable outcome of the write
    pub transaction: String,
}

impl TransactionResponse {
    pub fn new(status: StatusCode, transaction: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            transaction: transaction.to_string(),
        }
    }
}

impl IntoResponse for TransactionResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// JSON body for API errors.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Errors surfaced by the JSON handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A referenced row does not exist.
    #[error("{0}")]
    NotFound(&'static str),
    /// Any storage failure other than a missing row.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Database(err) => {
                tracing::error!("Unhandled database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (
            status_code,
            Json(ErrorResponse {
                detail: detail.to_string(),
            }),
        )
            .into_response()
    }
}

/// OpenAPI document for the user and task endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        description = "CRUD endpoints for users and the tasks they own."
    ),
    paths(
        crate::user::web::all_users_handler,
        crate::user::web::user_by_id_handler,
        crate::user::web::user_tasks_handler,
        crate::user::web::create_user_handler,
        crate::user::web::update_user_handler,
        crate::user::web::delete_user_handler,
        crate::task::web::all_tasks_handler,
        crate::task::web::task_by_id_handler,
        crate::task::web::create_task_handler,
        crate::task::web::update_task_handler,
        crate::task::web::delete_task_handler,
    ),
    components(schemas(
        User,
        Task,
        CreateUser,
        UpdateUser,
        CreateTask,
        UpdateTask,
        TransactionResponse,
        ErrorResponse
    )),
    tags(
        (name = "user", description = "User management"),
        (name = "task", description = "Task management")
    )
)]
pub struct ApiDoc;
