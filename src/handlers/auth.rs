use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::common::{validate_required, PageResponse};
use crate::middlewares::AuthUser;
use crate::models::CreateUser;
use crate::repositories::UserRepository;
use crate::services::{session, AuthService, Flash};
use crate::state::AppState;

// ============ Form DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username_or_email: String,
    #[serde(default)]
    pub password: String,
}

// ============ Handlers ============

/// Registration page
#[utoipa::path(
    get,
    path = "/registro",
    responses(
        (status = 200, description = "Registration page with pending notice", body = PageResponse)
    ),
    tag = "Auth"
)]
pub async fn register_page(flash: Flash) -> impl IntoResponse {
    (
        [(SET_COOKIE, Flash::clear_cookie())],
        Json(PageResponse {
            page: "registro".to_string(),
            notice: flash.into_message(),
        }),
    )
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/registro",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "User registered, redirect to login"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> AppResult<Response> {
    AuthService::validate_registration(
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.confirm_password,
    )?;

    let create_user = CreateUser {
        username: validate_required(&payload.username, "Username")?,
        email: validate_required(&payload.email, "Email")?,
    };

    if UserRepository::username_or_email_exists(&state.db, &create_user.username, &create_user.email)
        .await?
    {
        return Err(AppError::Conflict(
            "Username or email already exists".to_string(),
        ));
    }

    // Hash password
    let password_hash = AuthService::hash_password(&payload.password)?;

    let user = UserRepository::create(&state.db, &create_user, &password_hash).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Flash::redirect(
        "/login",
        "Registration successful, you can now log in",
    ))
}

/// Login page
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page with pending notice", body = PageResponse)
    ),
    tag = "Auth"
)]
pub async fn login_page(flash: Flash) -> impl IntoResponse {
    (
        [(SET_COOKIE, Flash::clear_cookie())],
        Json(PageResponse {
            page: "login".to_string(),
            notice: flash.into_message(),
        }),
    )
}

/// Login with username or email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Login successful, session cookie set"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginForm>,
) -> AppResult<Response> {
    let identifier = payload.username_or_email.trim();

    // Unknown user and wrong password look the same to the caller
    let user = UserRepository::find_by_username_or_email(&state.db, identifier)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::InvalidCredentials,
            other => other,
        })?;

    let is_valid = AuthService::verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = AuthService::generate_token(user.id, &user.username, &state.config)?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        AppendHeaders([
            (
                SET_COOKIE,
                session::session_cookie(&token, state.config.session_max_age_secs()),
            ),
            (
                SET_COOKIE,
                Flash::cookie(&format!("Welcome, {}!", user.username)),
            ),
        ]),
        Redirect::to("/"),
    )
        .into_response())
}

/// Log out and clear the session
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared, redirect to login")
    ),
    tag = "Auth"
)]
pub async fn logout(user: AuthUser) -> Response {
    tracing::info!(user_id = user.id, "User logged out");

    (
        AppendHeaders([
            (SET_COOKIE, session::clear_session_cookie()),
            (SET_COOKIE, Flash::cookie("You have been logged out")),
        ]),
        Redirect::to("/login"),
    )
        .into_response()
}
