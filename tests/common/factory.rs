use std::sync::atomic::{AtomicUsize, Ordering};

use tareas::models::{CreateProject, CreateTask, CreateUser, Project, Task};
use tareas::repositories::{ProjectRepository, TaskRepository, UserRepository};
use tareas::services::AuthService;
use tareas::state::AppState;

static NEXT_USER: AtomicUsize = AtomicUsize::new(1);

pub const TEST_PASSWORD: &str = "secret1";

/// Authentication info for tests
pub struct TestAuth {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Get the Cookie header value a browser would send
    pub fn session_cookie(&self) -> String {
        format!("session={}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let n = NEXT_USER.fetch_add(1, Ordering::Relaxed);
        self.create_named_user(&format!("user{}", n)).await
    }

    /// Create a test user with a given username
    pub async fn create_named_user(&self, username: &str) -> TestAuth {
        let email = format!("{}@example.com", username);
        let input = CreateUser {
            username: username.to_string(),
            email: email.clone(),
        };

        let password_hash = AuthService::hash_password(TEST_PASSWORD).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token =
            AuthService::generate_token(user.id, &user.username, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            username: user.username,
            email,
            token,
        }
    }

    /// Create a test project
    pub async fn create_project(&self, user_id: i32) -> Project {
        self.create_project_with_name(user_id, "Test Project").await
    }

    /// Create a test project with specific name
    pub async fn create_project_with_name(&self, user_id: i32, nombre: &str) -> Project {
        let input = CreateProject {
            nombre: nombre.to_string(),
            descripcion: Some("Test project description".to_string()),
        };

        ProjectRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }

    /// Create a test task, optionally under a parent
    pub async fn create_task(&self, proyecto_id: i32, titulo: &str, parent_id: Option<i32>) -> Task {
        let input = CreateTask {
            titulo: titulo.to_string(),
            descripcion: None,
            parent_id,
        };

        TaskRepository::create(&self.state.db, proyecto_id, &input)
            .await
            .unwrap()
    }
}
