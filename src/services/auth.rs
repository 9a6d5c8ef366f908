use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user id
    pub username: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

pub struct AuthService;

impl AuthService {
    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        let result = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        Ok(result)
    }

    /// Check registration input before anything touches the database
    pub fn validate_registration(
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<()> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }
        if password != confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    /// Generate a session token for a user
    pub fn generate_token(user_id: i32, username: &str, config: &Config) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::hours(config.jwt_expiration_hours);

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp: exp.unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(token)
    }

    /// Verify and decode a session token
    pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: "unit-test-secret-that-is-long-enough".to_string(),
            jwt_expiration_hours: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            seed_demo_user: false,
        }
    }

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = AuthService::hash_password("secret1").unwrap();
        assert!(AuthService::verify_password("secret1", &hash).unwrap());
        assert!(!AuthService::verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = AuthService::hash_password("secret1").unwrap();
        let b = AuthService::hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_round_trips_identity() {
        let config = config();
        let token = AuthService::generate_token(42, "alice", &config).unwrap();
        let claims = AuthService::verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = config();
        let token = AuthService::generate_token(1, "alice", &config).unwrap();
        let other = Config {
            jwt_secret: "a-completely-different-secret-value".to_string(),
            ..config
        };
        assert!(matches!(
            AuthService::verify_token(&token, &other),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn registration_rules() {
        assert!(AuthService::validate_registration("alice", "a@x.com", "secret1", "secret1").is_ok());
        assert!(AuthService::validate_registration("alice", "a@x.com", "12345", "12345").is_err());
        assert!(AuthService::validate_registration("alice", "a@x.com", "secret1", "secret2").is_err());
        assert!(AuthService::validate_registration("", "a@x.com", "secret1", "secret1").is_err());
        assert!(AuthService::validate_registration("alice", " ", "secret1", "secret1").is_err());
    }
}
