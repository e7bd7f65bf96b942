//! Account registration for Corkboard.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_registration, TAKEN};
use crate::auth::{hash_password, PasswordError};
use crate::db::{NewUser, User, UserRepository};
use crate::error::FieldErrors;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// One or more fields are invalid (including a taken email).
    #[error("validation error: {0}")]
    Invalid(FieldErrors),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Display name (1-50 characters).
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password (8-128 characters).
    pub password: String,
    /// Must equal `password`.
    pub password_confirmation: String,
}

impl RegistrationRequest {
    /// Create a request whose confirmation matches the password.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            password_confirmation: password.clone(),
            password,
        }
    }

    /// Override the password confirmation.
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
    }
}

fn email_taken() -> RegistrationError {
    let mut errors = FieldErrors::new();
    errors.add("email", TAKEN);
    RegistrationError::Invalid(errors)
}

/// Register a new account.
///
/// All fields are validated together. The name and email are stored trimmed
/// and the password is stored as an Argon2id hash.
pub async fn register(
    repo: &UserRepository<'_>,
    request: RegistrationRequest,
) -> std::result::Result<User, RegistrationError> {
    let errors = validate_registration(
        &request.name,
        &request.email,
        &request.password,
        &request.password_confirmation,
    );
    if !errors.is_empty() {
        return Err(RegistrationError::Invalid(errors));
    }

    let name = request.name.trim();
    let email = request.email.trim();

    if repo
        .email_exists(email)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(email_taken());
    }

    let password_hash = hash_password(&request.password)?;

    let user = match repo.create(&NewUser::new(name, email, password_hash)).await {
        Ok(user) => user,
        Err(e) => {
            // A concurrent registration may have claimed the email since the check.
            if repo.email_exists(email).await.unwrap_or(false) {
                return Err(email_taken());
            }
            return Err(RegistrationError::Database(e.to_string()));
        }
    };

    info!(
        email = %user.email,
        user_id = user.id,
        "New user registered"
    );

    Ok(user)
}
