//! Post and comment models for Corkboard.

/// Post entity, joined with its author's identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the board this post belongs to.
    pub board_id: i64,
    /// ID of the author.
    pub user_id: i64,
    /// Post content.
    pub content: String,
    /// Author display name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Comment entity, joined with its author's identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// ID of the post this comment belongs to.
    pub post_id: i64,
    /// ID of the author (the commenter, not necessarily the post author).
    pub user_id: i64,
    /// Comment content.
    pub content: String,
    /// Author display name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub board_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl NewPost {
    pub fn new(board_id: i64, user_id: i64, content: impl Into<String>) -> Self {
        Self {
            board_id,
            user_id,
            content: content.into(),
        }
    }
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl NewComment {
    pub fn new(post_id: i64, user_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            content: content.into(),
        }
    }
}
