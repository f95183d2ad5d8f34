use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::schemas::{CreateUser, UpdateUser};
use crate::task::Task;
use crate::user::{User, UserService, UserServiceError};
use crate::web::api::{ApiError, ErrorResponse, TransactionResponse, USER_NOT_FOUND};

#[derive(Clone, Debug)]
pub struct UserState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Query string identifying a single user.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// ID of the user
    user_id: i32,
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound(_) => ApiError::NotFound(USER_NOT_FOUND),
            UserServiceError::Database(db_err) => ApiError::Database(db_err),
        }
    }
}

/// Handler for GET /user/ - Returns every user.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/user/",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn all_users_handler(
    State(state): State<UserState>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserService::new(&state.db).get_all_users().await?;
    Ok(Json(users))
}

/// Handler for GET /user/user_id - Returns one user.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/user/user_id",
    params(UserIdQuery),
    responses(
        (status = 200, description = "The requested user", body = User),
        (status = 404, description = "User was not found", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn user_by_id_handler(
    State(state): State<UserState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<User>, ApiError> {
    let user = UserService::new(&state.db)
        .get_user_by_id(query.user_id)
        .await?;
    Ok(Json(user))
}

/// Handler for GET /user/tasks - Returns the tasks owned by one user.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/user/tasks",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Tasks owned by the user", body = [Task]),
        (status = 404, description = "User was not found", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn user_tasks_handler(
    State(state): State<UserState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = UserService::new(&state.db)
        .get_tasks_for_user(query.user_id)
        .await?;
    Ok(Json(tasks))
}

/// Handler for POST /user/create.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/user/create",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = TransactionResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn create_user_handler(
    State(state): State<UserState>,
    Json(payload): Json<CreateUser>,
) -> Result<TransactionResponse, ApiError> {
    UserService::new(&state.db).create_user(payload).await?;
    Ok(TransactionResponse::new(StatusCode::CREATED, "Successful"))
}

/// Handler for PUT /user/update.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/user/update",
    params(UserIdQuery),
    request_body = UpdateUser,
    responses(
        (status = 201, description = "User updated", body = TransactionResponse),
        (status = 404, description = "User was not found", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn update_user_handler(
    State(state): State<UserState>,
    Query(query): Query<UserIdQuery>,
    Json(payload): Json<UpdateUser>,
) -> Result<TransactionResponse, ApiError> {
    UserService::new(&state.db)
        .update_user(query.user_id, payload)
        .await?;
    Ok(TransactionResponse::new(StatusCode::CREATED, "Successful"))
}

/// Handler for DELETE /user/delete.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/user/delete",
    params(UserIdQuery),
    responses(
        (status = 201, description = "User deleted", body = TransactionResponse),
        (status = 404, description = "User was not found", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn delete_user_handler(
    State(state): State<UserState>,
    Query(query): Query<UserIdQuery>,
) -> Result<TransactionResponse, ApiError> {
    UserService::new(&state.db).delete_user(query.user_id).await?;
    Ok(TransactionResponse::new(StatusCode::CREATED, "Successful"))
}

/// Creates and returns the user router with all user-related routes.
pub fn create_user_router(state: UserState) -> Router {
    Router::new()
        .route("/user/", get(all_users_handler))
        .route("/user/user_id", get(user_by_id_handler))
        .route("/user/tasks", get(user_tasks_handler))
        .route("/user/create", post(create_user_handler))
        .route("/user/update", put(update_user_handler))
        .route("/user/delete", delete(delete_user_handler))
        .with_state(state)
}
