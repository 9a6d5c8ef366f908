//! Ownership checks.
//!
//! Every read or mutation of a project or task goes through one of these
//! functions first. A resource that exists but belongs to someone else is
//! reported exactly like a missing one.

use sea_orm::DatabaseConnection;

use crate::error::{AppError, AppResult};
use crate::models::{Project, Task};
use crate::repositories::{ProjectRepository, TaskRepository};

pub struct AccessService;

impl AccessService {
    /// Return the project if `user_id` owns it
    pub async fn authorize_project(
        db: &DatabaseConnection,
        user_id: i32,
        proyecto_id: i32,
    ) -> AppResult<Project> {
        ProjectRepository::find_by_id_and_user(db, proyecto_id, user_id)
            .await
            .map_err(|e| Self::log_denied(e, "project", proyecto_id, user_id))
    }

    /// Return the task if its project is owned by `user_id`
    pub async fn authorize_task(
        db: &DatabaseConnection,
        user_id: i32,
        tarea_id: i32,
    ) -> AppResult<Task> {
        TaskRepository::find_by_id_and_user(db, tarea_id, user_id)
            .await
            .map_err(|e| Self::log_denied(e, "task", tarea_id, user_id))
    }

    /// Return the parent task if it is owned by `user_id` and lives in `proyecto_id`
    pub async fn authorize_parent(
        db: &DatabaseConnection,
        user_id: i32,
        proyecto_id: i32,
        parent_id: i32,
    ) -> AppResult<Task> {
        let parent = Self::authorize_task(db, user_id, parent_id).await?;
        if parent.proyecto_id != proyecto_id {
            tracing::warn!(
                parent_id,
                proyecto_id,
                "Parent task belongs to a different project"
            );
            return Err(AppError::NotFound("Parent task".to_string()));
        }
        Ok(parent)
    }

    fn log_denied(err: AppError, resource: &str, id: i32, user_id: i32) -> AppError {
        if let AppError::NotFound(_) = err {
            tracing::warn!(resource, id, user_id, "Access denied or resource missing");
        }
        err
    }
}
