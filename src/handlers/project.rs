use axum::{extract::State, response::Redirect, Form};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::common::{validate_optional, validate_required};
use crate::middlewares::AuthUser;
use crate::models::{CreateProject, Project};
use crate::repositories::ProjectRepository;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectForm {
    #[serde(default)]
    pub nombre_proyecto: String,
    pub descripcion_proyecto: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub usuario_id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: time::OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            usuario_id: p.usuario_id,
            nombre: p.nombre,
            descripcion: p.descripcion,
            fecha_creacion: p.fecha_creacion,
        }
    }
}

// ============ Handlers ============

/// Create a new project owned by the current user
#[utoipa::path(
    post,
    path = "/crear_proyecto",
    request_body(content = CreateProjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Project created, redirect to its task list"),
        (status = 400, description = "Validation error")
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Form(payload): Form<CreateProjectForm>,
) -> AppResult<Redirect> {
    let create_project = CreateProject {
        nombre: validate_required(&payload.nombre_proyecto, "Project name")?,
        descripcion: validate_optional(payload.descripcion_proyecto),
    };

    let project = ProjectRepository::create(&state.db, user.id, &create_project).await?;
    tracing::info!(project_id = project.id, user_id = user.id, "Project created");

    Ok(Redirect::to(&format!("/?proyecto_id={}", project.id)))
}
