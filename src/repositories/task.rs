use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entity::project::Column as ProjectColumn;
use crate::entity::task::{self, ActiveModel, Column, Entity as TaskEntity, Relation};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTask, Task};
use crate::repositories::Repository;

/// Task repository for database operations
pub struct TaskRepository;

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Task> {
        let model = TaskEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        Ok(model.into())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = TaskEntity::find().count(db).await?;
        Ok(count)
    }
}

impl TaskRepository {
    /// Create a new task in a project. Ownership must already be verified.
    pub async fn create(
        db: &DatabaseConnection,
        proyecto_id: i32,
        input: &CreateTask,
    ) -> AppResult<Task> {
        let model = ActiveModel {
            proyecto_id: Set(proyecto_id),
            parent_id: Set(input.parent_id),
            titulo: Set(input.titulo.clone()),
            descripcion: Set(input.descripcion.clone()),
            completada: Set(false),
            fecha_creacion: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Find task by ID, verifying ownership through its project
    pub async fn find_by_id_and_user(
        db: &DatabaseConnection,
        id: i32,
        user_id: i32,
    ) -> AppResult<Task> {
        let model = TaskEntity::find_by_id(id)
            .join(sea_orm::JoinType::InnerJoin, Relation::Project.def())
            .filter(ProjectColumn::UsuarioId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        Ok(model.into())
    }

    /// List the tasks of a project ordered by (parent_id, id).
    ///
    /// Top-level tasks sort first since SQLite orders NULL lowest; subtasks follow
    /// grouped by parent id, not as a tree walk.
    pub async fn list_by_project(
        db: &DatabaseConnection,
        proyecto_id: i32,
    ) -> AppResult<Vec<Task>> {
        let models = TaskEntity::find()
            .filter(Column::ProyectoId.eq(proyecto_id))
            .order_by_asc(Column::ParentId)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Flip the completion flag in a single statement
    pub async fn toggle_completion(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = TaskEntity::update_many()
            .col_expr(Column::Completada, Expr::col(Column::Completada).not())
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Task".to_string()));
        }

        Ok(())
    }

    /// Delete a task and its direct subtasks.
    ///
    /// Only one level is removed: subtasks of those subtasks are left in place with
    /// their parent_id pointing at a deleted row.
    pub async fn delete_with_children(db: &DatabaseConnection, id: i32) -> AppResult<u64> {
        let result = TaskEntity::delete_many()
            .filter(
                Condition::any()
                    .add(Column::Id.eq(id))
                    .add(Column::ParentId.eq(id)),
            )
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Task".to_string()));
        }

        Ok(result.rows_affected)
    }
}

// Conversion from SeaORM model to our domain model
impl From<task::Model> for Task {
    fn from(m: task::Model) -> Self {
        Self {
            id: m.id,
            proyecto_id: m.proyecto_id,
            parent_id: m.parent_id,
            titulo: m.titulo,
            descripcion: m.descripcion,
            completada: m.completada,
            fecha_creacion: m.fecha_creacion,
        }
    }
}
