//! Response DTOs for the web API.
//!
//! Successful responses are plain JSON objects or arrays. Paginated lists
//! carry their metadata in `Total`, `Per-Page` and `Page` headers.

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::board::{Board, BoardAccess, Comment, PaginatedResult, Post};
use crate::db::User;

/// Total item count header.
pub const TOTAL_HEADER: &str = "total";
/// Page size header.
pub const PER_PAGE_HEADER: &str = "per-page";
/// Current page header.
pub const PAGE_HEADER: &str = "page";

/// Public user identity.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response to registration and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    pub user: UserInfo,
}

/// Current user response (for /api/auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Board attributes.
#[derive(Debug, Serialize)]
pub struct BoardInfo {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Board> for BoardInfo {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            name: board.name,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

/// A board as seen by one member. The access secret is never included.
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub is_admin: bool,
    pub board: BoardInfo,
}

impl From<BoardAccess> for MembershipResponse {
    fn from(access: BoardAccess) -> Self {
        Self {
            is_admin: access.membership.is_admin,
            board: access.board.into(),
        }
    }
}

/// Post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub board_id: i64,
    pub content: String,
    pub user: UserInfo,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            board_id: post.board_id,
            content: post.content,
            user: UserInfo {
                id: post.user_id,
                name: post.author_name,
                email: post.author_email,
            },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment response. Always embeds the commenter's identity.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub user: UserInfo,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            user: UserInfo {
                id: comment.user_id,
                name: comment.author_name,
                email: comment.author_email,
            },
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// A page of items rendered as a JSON array plus pagination headers.
#[derive(Debug)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub page: i64,
}

impl<T: Serialize> Paginated<T> {
    /// Convert a domain page, mapping each item.
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let page = result.page();
        Self {
            items: result.items.into_iter().map(f).collect(),
            total: result.total,
            per_page: result.limit,
            page,
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.items).into_response();
        let headers = response.headers_mut();
        for (name, value) in [
            (TOTAL_HEADER, self.total),
            (PER_PAGE_HEADER, self.per_page),
            (PAGE_HEADER, self.page),
        ] {
            headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Membership;

    fn access(is_admin: bool) -> BoardAccess {
        BoardAccess {
            board: Board {
                id: 7,
                name: "Team".to_string(),
                created_at: "2024-01-01 00:00:00".to_string(),
                updated_at: "2024-01-01 00:00:00".to_string(),
            },
            membership: Membership {
                id: 1,
                user_id: 2,
                board_id: 7,
                is_admin,
                encrypted_password: Some("$argon2id$secret".to_string()),
                created_at: "2024-01-01 00:00:00".to_string(),
                updated_at: "2024-01-01 00:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_membership_response_hides_secret() {
        let json = serde_json::to_value(MembershipResponse::from(access(true))).unwrap();
        assert_eq!(json["is_admin"], true);
        assert_eq!(json["board"]["id"], 7);
        assert_eq!(json["board"]["name"], "Team");
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_paginated_headers() {
        let result = PaginatedResult {
            items: vec![1, 2, 3],
            total: 23,
            offset: 20,
            limit: 20,
        };
        let response = Paginated::from_result(result, |n| n * 10).into_response();
        let headers = response.headers();
        assert_eq!(headers["total"], "23");
        assert_eq!(headers["per-page"], "20");
        assert_eq!(headers["page"], "2");
    }
}
