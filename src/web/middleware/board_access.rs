//! Board access extractors.
//!
//! Handlers declare the access they need by type:
//! [`AuthUser`] (401) then [`BoardMember`] (404/403) then [`BoardAdmin`]
//! (403). Each stage runs the previous one first, so unauthenticated
//! requests are rejected before any board lookup happens.

use axum::{
    async_trait,
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};
use std::sync::Arc;

use super::auth::AuthUser;
use crate::board::{ensure_board_owner, resolve_board, BoardAccess};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Read the board identifier from the route: `board_id`, else `id`.
async fn board_id_from_path<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<i64> {
    let params = RawPathParams::from_request_parts(parts, state).await.ok()?;

    let mut fallback = None;
    for (key, value) in params.iter() {
        match key {
            "board_id" => return value.parse().ok(),
            "id" => fallback = value.parse().ok(),
            _ => {}
        }
    }
    fallback
}

/// An authenticated member of the board named in the route.
#[derive(Debug, Clone)]
pub struct BoardMember {
    pub user: AuthUser,
    pub access: BoardAccess,
}

impl BoardMember {
    /// The member's user ID.
    pub fn user_id(&self) -> i64 {
        self.user.id()
    }

    /// The board's ID.
    pub fn board_id(&self) -> i64 {
        self.access.board.id
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for BoardMember {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let board_id = board_id_from_path(parts, state).await;
        let access = resolve_board(state.db.pool(), board_id, user.id()).await?;

        Ok(Self { user, access })
    }
}

/// A board member holding admin rights.
#[derive(Debug, Clone)]
pub struct BoardAdmin(pub BoardMember);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for BoardAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let member = BoardMember::from_request_parts(parts, state).await?;
        ensure_board_owner(&member.access)?;
        Ok(Self(member))
    }
}
