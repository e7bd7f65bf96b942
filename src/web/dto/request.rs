//! Request DTOs for the web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::not_empty_trimmed;

/// Account registration request (`POST /user`).
///
/// Only the shape is checked here. Field rules live in
/// [`crate::auth::register`], which trims before validating.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub password: String,
}

/// Nested board attributes (`{"board": {"name": ...}}`).
#[derive(Debug, Default, Deserialize)]
pub struct BoardParams {
    #[serde(default)]
    pub name: Option<String>,
}

/// Board create/update request.
///
/// The name may be given at the top level or nested under `board`; the
/// nested form wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct BoardRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub board: Option<BoardParams>,
    /// Plain shared-access secret.
    #[serde(default)]
    pub encrypted_password: Option<String>,
}

impl BoardRequest {
    /// The requested board name, if any.
    pub fn board_name(&self) -> Option<&str> {
        self.board
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .or(self.name.as_deref())
    }
}

/// Share a board with a registered user.
#[derive(Debug, Deserialize, Validate)]
pub struct ShareBoardRequest {
    /// Looked up trimmed and case-insensitively; unknown addresses are a 404.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub email: String,
}

/// Join a board by its shared-access secret.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinBoardRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub encrypted_password: String,
}

/// Post or comment body.
///
/// `content` stays optional here so a missing or null value is reported as a
/// field error rather than a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// `?page=N` query. Anything that isn't a positive integer means page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested 1-based page.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}
