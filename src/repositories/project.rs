use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, Project};
use crate::repositories::Repository;

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = ProjectEntity::find().count(db).await?;
        Ok(count)
    }
}

impl ProjectRepository {
    /// Create a new project owned by `user_id`
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        input: &CreateProject,
    ) -> AppResult<Project> {
        let model = ActiveModel {
            usuario_id: Set(user_id),
            nombre: Set(input.nombre.clone()),
            descripcion: Set(input.descripcion.clone()),
            fecha_creacion: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Find project by ID and verify ownership
    pub async fn find_by_id_and_user(
        db: &DatabaseConnection,
        id: i32,
        user_id: i32,
    ) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .filter(Column::UsuarioId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    /// List all projects for a specific user, oldest first
    pub async fn list_by_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .filter(Column::UsuarioId.eq(user_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Find a project by owner and name
    pub async fn find_by_user_and_name(
        db: &DatabaseConnection,
        user_id: i32,
        nombre: &str,
    ) -> AppResult<Option<Project>> {
        let model = ProjectEntity::find()
            .filter(Column::UsuarioId.eq(user_id))
            .filter(Column::Nombre.eq(nombre))
            .order_by_asc(Column::Id)
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            usuario_id: m.usuario_id,
            nombre: m.nombre,
            descripcion: m.descripcion,
            fecha_creacion: m.fecha_creacion,
        }
    }
}
