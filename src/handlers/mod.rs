pub mod auth;
pub mod common;
pub mod dashboard;
pub mod project;
pub mod task;

pub use auth::{login, login_page, logout, register, register_page, LoginForm, RegisterForm};
pub use common::{parse_optional_id, validate_optional, validate_required, PageResponse};
pub use dashboard::{index, DashboardParams, DashboardResponse, SessionUserResponse};
pub use project::{create_project, CreateProjectForm, ProjectResponse};
pub use task::{create_task, delete_task, toggle_task, CreateTaskForm, TaskResponse};
