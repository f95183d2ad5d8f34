use crate::entities::*;
use crate::schemas::{CreateUser, UpdateUser};
use crate::slug::slugify;
use crate::task::Task;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::Serialize;
use utoipa::ToSchema;

pub mod web;

pub use web::{UserState, create_user_router};

/// A registered user as returned by the read endpoints.
#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, ToSchema)]
pub struct User {
    id: i32,
    username: String,
    firstname: String,
    lastname: String,
    age: i32,
    slug: String,
}

impl User {
    pub fn new(
        id: i32,
        username: String,
        firstname: String,
        lastname: String,
        age: i32,
        slug: String,
    ) -> Self {
        Self {
            id,
            username,
            firstname,
            lastname,
            age,
            slug,
        }
    }

    /// Returns the ID of the user.
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the slug derived from the username at creation time.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        User::new(
            model.id,
            model.username,
            model.firstname,
            model.lastname,
            model.age,
            model.slug,
        )
    }
}

/// Error type for UserService operations.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// No user row carries the requested ID.
    #[error("User with ID {0} not found")]
    NotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct UserService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl UserService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> UserService<'_> {
        UserService { db }
    }

    /// Retrieves all users in storage order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, UserServiceError> {
        let users = user::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(users)
    }

    /// Retrieves a single user by ID.
    ///
    /// # Returns
    ///
    /// The matching `User`, or `UserServiceError::NotFound` when no row has that ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: i32) -> Result<User, UserServiceError> {
        let model = self.find_user(id).await?;
        Ok(User::from(model))
    }

    /// Inserts a new user whose slug is derived from the username.
    ///
    /// A duplicate username violates the unique constraint and comes back as
    /// `UserServiceError::Database`.
    #[tracing::instrument(skip(self))]
    pub async fn create_user(&self, request: CreateUser) -> Result<(), UserServiceError> {
        let slug = slugify(&request.username);
        let active_model = user::ActiveModel {
            username: ActiveValue::Set(request.username),
            firstname: ActiveValue::Set(request.firstname),
            lastname: ActiveValue::Set(request.lastname),
            age: ActiveValue::Set(request.age),
            slug: ActiveValue::Set(slug),
            ..Default::default()
        };
        user::Entity::insert(active_model)
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    /// Overwrites the first name, last name and age of an existing user.
    ///
    /// Username and slug are left untouched. Nothing is written when the user
    /// does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn update_user(&self, id: i32, request: UpdateUser) -> Result<(), UserServiceError> {
        self.find_user(id).await?;

        user::Entity::update_many()
            .col_expr(user::Column::Firstname, Expr::value(request.firstname))
            .col_expr(user::Column::Lastname, Expr::value(request.lastname))
            .col_expr(user::Column::Age, Expr::value(request.age))
            .filter(user::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes an existing user. Tasks owned by the user are removed by the
    /// `ON DELETE CASCADE` foreign key.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
        self.find_user(id).await?;

        user::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    /// Lists the tasks owned by an existing user.
    #[tracing::instrument(skip(self))]
    pub async fn get_tasks_for_user(&self, id: i32) -> Result<Vec<Task>, UserServiceError> {
        let owner = self.find_user(id).await?;
        let tasks = owner
            .find_related(task::Entity)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    async fn find_user(&self, id: i32) -> Result<user::Model, UserServiceError> {
        user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_model(id: i32, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            age: 30,
            slug: slugify(username),
        }
    }

    fn write_result() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn can_store_slug_derived_from_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([write_result()])
            .into_connection();

        UserService::new(&db)
            .create_user(CreateUser {
                username: "John Doe".to_string(),
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
                age: 30,
            })
            .await
            .expect("Failed to create user");

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("INSERT INTO"));
        assert!(statement.contains("john-doe"));
    }

    #[tokio::test]
    async fn can_get_user_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(4, "jdoe")]])
            .into_connection();

        let found = UserService::new(&db)
            .get_user_by_id(4)
            .await
            .expect("Failed to get user");

        assert_eq!(found.id(), 4);
        assert_eq!(found.username(), "jdoe");
        assert_eq!(found.slug(), "jdoe");
    }

    #[tokio::test]
    async fn can_report_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = UserService::new(&db).get_user_by_id(99).await;

        assert!(matches!(result, Err(UserServiceError::NotFound(99))));
    }

    #[tokio::test]
    async fn can_skip_write_when_updating_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = UserService::new(&db)
            .update_user(
                12,
                UpdateUser {
                    firstname: "Jane".to_string(),
                    lastname: "Roe".to_string(),
                    age: 40,
                },
            )
            .await;

        assert!(matches!(result, Err(UserServiceError::NotFound(12))));
        // Only the existence lookup ran.
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn can_update_without_touching_username_or_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(3, "jdoe")]])
            .append_exec_results([write_result()])
            .into_connection();

        UserService::new(&db)
            .update_user(
                3,
                UpdateUser {
                    firstname: "Jane".to_string(),
                    lastname: "Roe".to_string(),
                    age: 41,
                },
            )
            .await
            .expect("Failed to update user");

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
        let statement = format!("{:?}", log[1]);
        assert!(statement.contains("UPDATE"));
        assert!(statement.contains("Jane"));
        assert!(!statement.contains("slug"));
        assert!(!statement.contains("username"));
    }

    #[tokio::test]
    async fn can_skip_write_when_deleting_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = UserService::new(&db).delete_user(8).await;

        assert!(matches!(result, Err(UserServiceError::NotFound(8))));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn can_delete_existing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(5, "gone")]])
            .append_exec_results([write_result()])
            .into_connection();

        UserService::new(&db)
            .delete_user(5)
            .await
            .expect("Failed to delete user");

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
        assert!(format!("{:?}", log[1]).contains("DELETE FROM"));
    }
}
