use sea_orm::DatabaseConnection;

use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, CreateUser};
use crate::repositories::{ProjectRepository, UserRepository};
use crate::services::AuthService;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_EMAIL: &str = "demo@ejemplo.com";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_PROJECT: &str = "Proyecto de Demo";
const DEMO_PROJECT_DESCRIPTION: &str = "Proyecto de ejemplo para usuario demo";

/// Make sure the demo account and its sample project exist. Safe to run on every start.
///
/// An existing `demo` account that does not use the demo password belongs to someone
/// else and is left alone.
pub async fn seed_demo_user(db: &DatabaseConnection) -> AppResult<()> {
    let user = match UserRepository::find_by_username(db, DEMO_USERNAME).await? {
        Some(user) => {
            if !AuthService::verify_password(DEMO_PASSWORD, &user.password_hash)? {
                tracing::warn!(
                    user_id = user.id,
                    "Username 'demo' is taken by another account, skipping demo seed"
                );
                return Ok(());
            }
            user
        }
        None => {
            let password_hash = AuthService::hash_password(DEMO_PASSWORD)?;
            let input = CreateUser {
                username: DEMO_USERNAME.to_string(),
                email: DEMO_EMAIL.to_string(),
            };
            match UserRepository::create(db, &input, &password_hash).await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "Demo user created");
                    user
                }
                Err(AppError::Conflict(_)) => {
                    tracing::warn!(
                        email = DEMO_EMAIL,
                        "Demo email is taken by another account, skipping demo seed"
                    );
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    };

    if ProjectRepository::find_by_user_and_name(db, user.id, DEMO_PROJECT)
        .await?
        .is_none()
    {
        let input = CreateProject {
            nombre: DEMO_PROJECT.to_string(),
            descripcion: Some(DEMO_PROJECT_DESCRIPTION.to_string()),
        };
        let project = ProjectRepository::create(db, user.id, &input).await?;
        tracing::info!(project_id = project.id, "Demo project created");
    }

    Ok(())
}
