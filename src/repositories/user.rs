use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, User};
use crate::repositories::Repository;

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = UserEntity::find().count(db).await?;
        Ok(count)
    }
}

impl UserRepository {
    /// Create a new user
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let model = ActiveModel {
            username: Set(input.username.clone()),
            email: Set(input.email.clone()),
            password_hash: Set(password_hash.to_string()),
            fecha_registro: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        };

        // Existence is checked before insert, this catches the race
        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("unique") {
                AppError::Conflict("Username or email already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Find user by username or email (for login)
    pub async fn find_by_username_or_email(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Find user by username only
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await?;

        Ok(model.map(Into::into))
    }

    /// Check if a username or an email is already taken.
    ///
    /// Login accepts either column, so each value is checked against both.
    pub async fn username_or_email_exists(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
    ) -> AppResult<bool> {
        let identifiers = [username, email];
        let count = UserEntity::find()
            .filter(
                Condition::any()
                    .add(Column::Username.is_in(identifiers))
                    .add(Column::Email.is_in(identifiers)),
            )
            .count(db)
            .await?;

        Ok(count > 0)
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            password_hash: m.password_hash,
            fecha_registro: m.fecha_registro,
        }
    }
}
