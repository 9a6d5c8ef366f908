use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::common::{parse_optional_id, validate_optional, validate_required};
use crate::middlewares::AuthUser;
use crate::models::{CreateTask, Task};
use crate::repositories::TaskRepository;
use crate::services::AccessService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskForm {
    #[serde(default)]
    pub titulo: String,
    pub descripcion: Option<String>,
    /// Empty means a top-level task
    pub parent_id: Option<String>,
    pub proyecto_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: i32,
    pub proyecto_id: i32,
    pub parent_id: Option<i32>,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub completada: bool,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: time::OffsetDateTime,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            proyecto_id: t.proyecto_id,
            parent_id: t.parent_id,
            titulo: t.titulo,
            descripcion: t.descripcion,
            completada: t.completada,
            fecha_creacion: t.fecha_creacion,
        }
    }
}

fn project_view(proyecto_id: i32) -> Redirect {
    Redirect::to(&format!("/?proyecto_id={}", proyecto_id))
}

// ============ Handlers ============

/// Create a task (optionally a subtask) in one of the user's projects
#[utoipa::path(
    post,
    path = "/agregar",
    request_body(content = CreateTaskForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Task created, redirect to its project"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project or parent task not found")
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    Form(payload): Form<CreateTaskForm>,
) -> AppResult<Redirect> {
    let titulo = validate_required(&payload.titulo, "Title")?;
    let proyecto_id = parse_optional_id(payload.proyecto_id, "Project")?
        .ok_or_else(|| AppError::Validation("Project is required".to_string()))?;
    let parent_id = parse_optional_id(payload.parent_id, "Parent task")?;

    let project = AccessService::authorize_project(&state.db, user.id, proyecto_id).await?;
    if let Some(parent_id) = parent_id {
        AccessService::authorize_parent(&state.db, user.id, project.id, parent_id).await?;
    }

    let create_task = CreateTask {
        titulo,
        descripcion: validate_optional(payload.descripcion),
        parent_id,
    };

    let task = TaskRepository::create(&state.db, project.id, &create_task).await?;
    tracing::info!(task_id = task.id, proyecto_id = project.id, "Task created");

    Ok(project_view(project.id))
}

/// Toggle the completion flag of a task
#[utoipa::path(
    get,
    path = "/completar/{tarea_id}",
    params(
        ("tarea_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 303, description = "Completion toggled, redirect to the project"),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn toggle_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(tarea_id): Path<i32>,
) -> AppResult<Redirect> {
    let task = AccessService::authorize_task(&state.db, user.id, tarea_id).await?;

    TaskRepository::toggle_completion(&state.db, task.id).await?;
    tracing::debug!(task_id = task.id, "Task completion toggled");

    Ok(project_view(task.proyecto_id))
}

/// Delete a task together with its direct subtasks
#[utoipa::path(
    get,
    path = "/eliminar/{tarea_id}",
    params(
        ("tarea_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 303, description = "Task deleted, redirect to the project"),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(tarea_id): Path<i32>,
) -> AppResult<Redirect> {
    let task = AccessService::authorize_task(&state.db, user.id, tarea_id).await?;

    let removed = TaskRepository::delete_with_children(&state.db, task.id).await?;
    tracing::info!(task_id = task.id, removed, "Task deleted");

    Ok(project_view(task.proyecto_id))
}
