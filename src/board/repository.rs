//! Board repository for Corkboard.
//!
//! This module provides CRUD operations for boards. Writes that touch both a
//! board and its admin membership run in a single transaction.

use super::types::{Board, BoardAccess, Membership};
use crate::db::DbPool;
use crate::{CorkboardError, Result};

/// Membership joined with its board, as read by [`BoardRepository`].
#[derive(sqlx::FromRow)]
struct AccessRow {
    id: i64,
    user_id: i64,
    board_id: i64,
    is_admin: bool,
    encrypted_password: Option<String>,
    created_at: String,
    updated_at: String,
    board_name: String,
    board_created_at: String,
    board_updated_at: String,
}

impl AccessRow {
    fn into_access(self) -> BoardAccess {
        BoardAccess {
            board: Board {
                id: self.board_id,
                name: self.board_name,
                created_at: self.board_created_at,
                updated_at: self.board_updated_at,
            },
            membership: Membership {
                id: self.id,
                user_id: self.user_id,
                board_id: self.board_id,
                is_admin: self.is_admin,
                encrypted_password: self.encrypted_password,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

const ACCESS_COLUMNS: &str = "ub.id, ub.user_id, ub.board_id, ub.is_admin, ub.encrypted_password,
     ub.created_at, ub.updated_at,
     b.name AS board_name, b.created_at AS board_created_at, b.updated_at AS board_updated_at";

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a board and the creator's admin membership atomically.
    ///
    /// `secret_hash` is the already-hashed shared-access secret. If either
    /// insert fails, neither row is persisted.
    pub async fn create_with_admin(
        &self,
        user_id: i64,
        name: &str,
        secret_hash: &str,
    ) -> Result<BoardAccess> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        let board_id: i64 =
            sqlx::query_scalar("INSERT INTO boards (name) VALUES (?) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| CorkboardError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO user_boards (user_id, board_id, is_admin, encrypted_password)
             VALUES (?, ?, 1, ?)",
        )
        .bind(user_id)
        .bind(board_id)
        .bind(secret_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        self.get_access(user_id, board_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let result = sqlx::query_as::<_, Board>(
            "SELECT id, name, created_at, updated_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a board together with the given user's membership.
    ///
    /// Returns None if the board doesn't exist or the user isn't a member.
    pub async fn get_access(&self, user_id: i64, board_id: i64) -> Result<Option<BoardAccess>> {
        let sql = format!(
            "SELECT {ACCESS_COLUMNS}
             FROM user_boards ub JOIN boards b ON b.id = ub.board_id
             WHERE ub.user_id = ? AND ub.board_id = ?"
        );
        let row: Option<AccessRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(board_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(row.map(AccessRow::into_access))
    }

    /// List every board the user is a member of, ordered by board ID.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<BoardAccess>> {
        let sql = format!(
            "SELECT {ACCESS_COLUMNS}
             FROM user_boards ub JOIN boards b ON b.id = ub.board_id
             WHERE ub.user_id = ?
             ORDER BY b.id"
        );
        let rows: Vec<AccessRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(AccessRow::into_access).collect())
    }

    /// Update a board's name and/or a membership's secret atomically.
    ///
    /// `membership_id` identifies the admin membership whose secret changes.
    pub async fn update(
        &self,
        board_id: i64,
        membership_id: i64,
        name: Option<&str>,
        secret_hash: Option<&str>,
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        if let Some(name) = name {
            sqlx::query("UPDATE boards SET name = ?, updated_at = datetime('now') WHERE id = ?")
                .bind(name)
                .bind(board_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| CorkboardError::Database(e.to_string()))?;
        }

        if let Some(hash) = secret_hash {
            sqlx::query(
                "UPDATE user_boards SET encrypted_password = ?, updated_at = datetime('now')
                 WHERE id = ? AND board_id = ?",
            )
            .bind(hash)
            .bind(membership_id)
            .bind(board_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a board by ID.
    ///
    /// Memberships, posts and comments go with it through cascading foreign
    /// keys. Returns true if a board was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all boards.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        Ok(count)
    }
}
