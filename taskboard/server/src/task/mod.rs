use crate::entities::*;
use crate::schemas::{CreateTask, UpdateTask};
use crate::slug::slugify;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::Serialize;
use utoipa::ToSchema;

pub mod web;

pub use web::{TaskState, create_task_router};

/// A task owned by a user.
#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, ToSchema)]
pub struct Task {
    id: i32,
    title: String,
    content: String,
    priority: i32,
    completed: bool,
    slug: String,
    user_id: i32,
}

impl Task {
    pub fn new(
        id: i32,
        title: String,
        content: String,
        priority: i32,
        completed: bool,
        slug: String,
        user_id: i32,
    ) -> Self {
        Self {
            id,
            title,
            content,
            priority,
            completed,
            slug,
            user_id,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the slug derived from the current title.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the ID of the owning user.
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id,
            model.title,
            model.content,
            model.priority,
            model.completed,
            model.slug,
            model.user_id,
        )
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// The user a new task should belong to does not exist.
    #[error("User with ID {0} not found")]
    UserNotFound(i32),
    /// No task row carries the requested ID.
    #[error("Task with ID {0} not found")]
    NotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Retrieves all tasks in storage order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i32) -> Result<Task, TaskServiceError> {
        let model = self.find_task(id).await?;
        Ok(Task::from(model))
    }

    /// Inserts a task for an existing user, deriving its slug from the title.
    ///
    /// # Returns
    ///
    /// `TaskServiceError::UserNotFound` without inserting anything when the
    /// owner does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(
        &self,
        user_id: i32,
        request: CreateTask,
    ) -> Result<(), TaskServiceError> {
        let owner = user::Entity::find_by_id(user_id).one(self.db).await?;
        if owner.is_none() {
            return Err(TaskServiceError::UserNotFound(user_id));
        }

        let slug = slugify(&request.title);
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(request.title),
            content: ActiveValue::Set(request.content),
            priority: ActiveValue::Set(request.priority),
            completed: ActiveValue::Set(false),
            slug: ActiveValue::Set(slug),
            user_id: ActiveValue::Set(user_id),
            ..Default::default()
        };
        task::Entity::insert(active_model)
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    /// Overwrites title, content and priority of an existing task and
    /// recomputes its slug from the new title.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: i32, request: UpdateTask) -> Result<(), TaskServiceError> {
        self.find_task(id).await?;

        let slug = slugify(&request.title);
        task::Entity::update_many()
            .col_expr(task::Column::Title, Expr::value(request.title))
            .col_expr(task::Column::Content, Expr::value(request.content))
            .col_expr(task::Column::Priority, Expr::value(request.priority))
            .col_expr(task::Column::Slug, Expr::value(slug))
            .filter(task::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<(), TaskServiceError> {
        self.find_task(id).await?;

        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    async fn find_task(&self, id: i32) -> Result<task::Model, TaskServiceError> {
        task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }
}
