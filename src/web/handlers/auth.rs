//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use jsonwebtoken::EncodingKey;
use std::sync::Arc;

use crate::auth::{register as register_account, verify_password, RegistrationError, RegistrationRequest};
use crate::db::{User, UserRepository};
use crate::web::dto::{
    AuthResponse, JsonBody, LoginRequest, MeResponse, RegisterRequest, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, JwtClaims};
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool is internally shared).
    pub db: Database,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, jwt_secret: &str, access_expiry: u64) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ApiError> {
        JwtClaims::new(user.id, &user.name, self.access_token_expiry).encode(&self.encoding_key)
    }

    fn auth_response(&self, user: &User) -> Result<AuthResponse, ApiError> {
        Ok(AuthResponse {
            access_token: self.generate_access_token(user)?,
            token_type: "Bearer",
            expires_in: self.access_token_expiry,
            user: UserInfo::from(user),
        })
    }
}

/// POST /user - Register a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let request = RegistrationRequest::new(req.name, req.email, req.password)
        .with_confirmation(req.password_confirmation);

    let user = register_account(&repo, request).await.map_err(|e| match e {
        RegistrationError::Invalid(errors) => ApiError::from_field_errors(&errors),
        other => {
            tracing::error!("Failed to register user: {}", other);
            ApiError::internal("Failed to register user")
        }
    })?;

    Ok((StatusCode::CREATED, Json(state.auth_response(&user)?)))
}

/// POST /api/auth/login - Exchange email and password for a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_email(req.email.trim())
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {}", e);
            ApiError::internal("Database error")
        })?;

    let Some(user) = user else {
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    if verify_password(&req.password, &user.password).is_err() {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(state.auth_response(&user)?))
}

/// GET /api/auth/me - Current user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(auth.id())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {}", e);
            ApiError::internal("Database error")
        })?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(Json(user.into()))
}
