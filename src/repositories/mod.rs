pub mod project;
pub mod task;
pub mod user;

pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Base repository trait for common lookups
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID, without any ownership check
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<T>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}
