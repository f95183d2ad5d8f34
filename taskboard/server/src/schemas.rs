//! Request bodies accepted by the user and task endpoints.
//!
//! Every field is required; a body missing one of them, or carrying a value of
//! the wrong type, is rejected by the `Json` extractor before a handler runs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /user/create`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// Unique login name; the user's slug is derived from it.
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
}

/// Body of `PUT /user/update`. The username (and so the slug) cannot be changed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
}

/// Body of `POST /task/create`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTask {
    /// Display title; the task's slug is derived from it.
    pub title: String,
    pub content: String,
    pub priority: i32,
}

/// Body of `PUT /task/update`. Overwrites every field and recomputes the slug.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTask {
    pub title: String,
    pub content: String,
    pub priority: i32,
}
