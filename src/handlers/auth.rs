// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, is_unique_violation},
    models::user::{AuthResponse, LoginRequest, RegisterRequest, User, normalize_email},
    state::AppState,
    utils::{
        extract::ValidatedJson,
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

const USER_EXISTS: &str = "User already exists";
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created with the user (excluding password) and a signed token.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&payload.email);

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(USER_EXISTS.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password)
        VALUES (?, ?, ?)
        RETURNING id, name, email, password, role, created_at
        "#,
    )
    .bind(payload.name.trim())
    .bind(&email)
    .bind(hashed_password)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        // A concurrent registration with the same email won the race.
        if is_unique_violation(&e) {
            AppError::Conflict(USER_EXISTS.to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    let token = sign_jwt(
        user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown email and wrong password produce the same 401 message.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password, role, created_at FROM users WHERE email = ?",
    )
    .bind(normalize_email(&payload.email))
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?
    .ok_or_else(|| AppError::Auth(BAD_CREDENTIALS.to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(AuthResponse { user, token }))
}

/// Returns the user behind the bearer token.
pub async fn current_user(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
