//! Board access resolution.
//!
//! Every board-scoped action first resolves the caller's membership, then
//! optionally checks admin rights or authorship. Each step either yields the
//! context the next step needs or a categorized rejection.

use thiserror::Error;

use super::membership::MembershipRepository;
use super::repository::BoardRepository;
use super::types::BoardAccess;
use crate::db::DbPool;
use crate::CorkboardError;

/// Why access to a board-scoped resource was refused.
#[derive(Error, Debug)]
pub enum AccessError {
    /// No board identifier was supplied, or no board matches it.
    #[error("board not found")]
    NotFound,

    /// The board exists but the user has no membership.
    #[error("you are not a member of this board")]
    NotMember,

    /// The user is a member but not an admin.
    #[error("only the board admin can do that")]
    NotAdmin,

    /// The user is not the author of the resource.
    #[error("only the author can modify this {0}")]
    NotAuthor(&'static str),

    /// Lookup failed.
    #[error("database error: {0}")]
    Database(String),
}

impl From<CorkboardError> for AccessError {
    fn from(e: CorkboardError) -> Self {
        AccessError::Database(e.to_string())
    }
}

impl From<AccessError> for CorkboardError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound => CorkboardError::NotFound("board".to_string()),
            AccessError::Database(msg) => CorkboardError::Database(msg),
            other => CorkboardError::Permission(other.to_string()),
        }
    }
}

/// Load a board and the user's membership of it.
pub async fn resolve_board(
    pool: &DbPool,
    board_id: Option<i64>,
    user_id: i64,
) -> Result<BoardAccess, AccessError> {
    let board_id = board_id.ok_or(AccessError::NotFound)?;

    let board = BoardRepository::new(pool)
        .get_by_id(board_id)
        .await?
        .ok_or(AccessError::NotFound)?;

    let membership = MembershipRepository::new(pool)
        .get(user_id, board.id)
        .await?
        .ok_or(AccessError::NotMember)?;

    Ok(BoardAccess { board, membership })
}

/// Require admin membership.
pub fn ensure_board_owner(access: &BoardAccess) -> Result<(), AccessError> {
    if access.is_admin() {
        Ok(())
    } else {
        Err(AccessError::NotAdmin)
    }
}

/// Require that `user_id` authored the resource.
pub fn ensure_author(resource: &'static str, author_id: i64, user_id: i64) -> Result<(), AccessError> {
    if author_id == user_id {
        Ok(())
    } else {
        Err(AccessError::NotAuthor(resource))
    }
}
