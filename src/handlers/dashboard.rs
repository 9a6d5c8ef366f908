use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::handlers::project::ProjectResponse;
use crate::handlers::task::TaskResponse;
use crate::middlewares::AuthUser;
use crate::models::ActiveProject;
use crate::repositories::{ProjectRepository, TaskRepository};
use crate::services::{AccessService, Flash};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardParams {
    /// Project to show; the user's first project when absent or not a number
    pub proyecto_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUserResponse {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: SessionUserResponse,
    pub proyectos: Vec<ProjectResponse>,
    pub proyecto_activo_id: Option<i32>,
    pub proyecto_activo: Option<ProjectResponse>,
    pub tareas: Vec<TaskResponse>,
    pub notice: Option<String>,
}

/// Projects of the current user and the tasks of the active one
#[utoipa::path(
    get,
    path = "/",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard view", body = DashboardResponse),
        (status = 303, description = "Not logged in, redirect to login")
    ),
    tag = "Tasks"
)]
pub async fn index(
    user: AuthUser,
    State(state): State<AppState>,
    flash: Flash,
    Query(params): Query<DashboardParams>,
) -> AppResult<impl IntoResponse> {
    let proyectos = ProjectRepository::list_by_user(&state.db, user.id).await?;

    let requested = params
        .proyecto_id
        .and_then(|raw| raw.trim().parse::<i32>().ok());
    let active = ActiveProject::select(requested, &proyectos);

    let (proyecto_activo, tareas) = match active.id() {
        Some(id) => match AccessService::authorize_project(&state.db, user.id, id).await {
            Ok(project) => {
                let tareas = TaskRepository::list_by_project(&state.db, project.id).await?;
                (Some(project), tareas)
            }
            // Someone else's project shows as empty
            Err(AppError::NotFound(_)) => (None, Vec::new()),
            Err(e) => return Err(e),
        },
        None => (None, Vec::new()),
    };

    let body = DashboardResponse {
        user: SessionUserResponse {
            id: user.id,
            username: user.username,
        },
        proyectos: proyectos.into_iter().map(Into::into).collect(),
        proyecto_activo_id: active.id(),
        proyecto_activo: proyecto_activo.map(Into::into),
        tareas: tareas.into_iter().map(Into::into).collect(),
        notice: flash.into_message(),
    };

    Ok(([(SET_COOKIE, Flash::clear_cookie())], Json(body)))
}
