use anyhow::Context;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tareas::config::Config;
use tareas::handlers::{
    CreateProjectForm, CreateTaskForm, DashboardResponse, LoginForm, PageResponse,
    ProjectResponse, RegisterForm, SessionUserResponse, TaskResponse,
};
use tareas::services::seed_demo_user;
use tareas::state::AppState;
use tareas::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register_page,
        handlers::auth::register,
        handlers::auth::login_page,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::dashboard::index,
        handlers::project::create_project,
        handlers::task::create_task,
        handlers::task::toggle_task,
        handlers::task::delete_task,
    ),
    components(schemas(
        RegisterForm,
        LoginForm,
        PageResponse,
        CreateProjectForm,
        ProjectResponse,
        CreateTaskForm,
        TaskResponse,
        DashboardResponse,
        SessionUserResponse,
    )),
    tags(
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Projects", description = "Project management"),
        (name = "Tasks", description = "Task management within a project")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();
    let seed = config.seed_demo_user;

    tracing::info!(database_url = %config.database_url, "Opening database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database ready");

    if seed {
        seed_demo_user(&state.db)
            .await
            .context("Failed to seed demo user")?;
    }

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
