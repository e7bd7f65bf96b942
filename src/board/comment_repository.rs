//! Comment repository for Corkboard.

use super::post::{Comment, NewComment};
use crate::db::DbPool;
use crate::{CorkboardError, Result};

const COMMENT_SELECT: &str = "SELECT c.id, c.post_id, c.user_id, c.content,
            u.name AS author_name, u.email AS author_email,
            c.created_at, c.updated_at
     FROM comments c JOIN users u ON u.id = c.user_id";

/// Repository for comment CRUD operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, user_id, content) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_comment.post_id)
        .bind(new_comment.user_id)
        .bind(&new_comment.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.id = ?");
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Replace a comment's content.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<Option<Comment>> {
        let result = sqlx::query(
            "UPDATE comments SET content = ?, updated_at = datetime('now') WHERE id = ?",
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

    /// Delete a comment by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// List comments on a post, oldest first.
    pub async fn list_by_post_paginated(
        &self,
        post_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.post_id = ? ORDER BY c.id LIMIT ? OFFSET ?");
        let comments = sqlx::query_as::<_, Comment>(&sql)
            .bind(post_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(comments)
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        Ok(count)
    }
}
