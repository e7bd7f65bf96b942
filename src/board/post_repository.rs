//! Post repository for Corkboard.
//!
//! Posts are read joined with their author so callers can present the
//! author's identity without a second query.

use super::post::{NewPost, Post};
use crate::db::DbPool;
use crate::{CorkboardError, Result};

const POST_SELECT: &str = "SELECT p.id, p.board_id, p.user_id, p.content,
            u.name AS author_name, u.email AS author_email,
            p.created_at, p.updated_at
     FROM posts p JOIN users u ON u.id = p.user_id";

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (board_id, user_id, content) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_post.board_id)
        .bind(new_post.user_id)
        .bind(&new_post.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let sql = format!("{POST_SELECT} WHERE p.id = ?");
        let result = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Replace a post's content.
    ///
    /// Returns the updated post, or None if not found.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<Option<Post>> {
        let result = sqlx::query(
            "UPDATE posts SET content = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(content)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a post by ID. Its comments are removed by cascade.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// List posts in a board, newest first.
    pub async fn list_by_board_paginated(
        &self,
        board_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let sql = format!("{POST_SELECT} WHERE p.board_id = ? ORDER BY p.id DESC LIMIT ? OFFSET ?");
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(board_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count posts in a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        Ok(count)
    }
}
