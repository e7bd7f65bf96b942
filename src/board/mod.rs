//! Board module for Corkboard.
//!
//! This module provides the shared-board domain:
//! - Boards and memberships (admin and shared access)
//! - Posts on boards and comments on posts
//! - Access resolution (membership, admin rights, authorship)
//! - A service layer with validation and pagination

pub mod access;
mod comment_repository;
mod membership;
mod post;
mod post_repository;
mod repository;
mod service;
mod types;

pub use access::{ensure_author, ensure_board_owner, resolve_board, AccessError};
pub use comment_repository::CommentRepository;
pub use membership::MembershipRepository;
pub use post::{Comment, NewComment, NewPost, Post};
pub use post_repository::PostRepository;
pub use repository::BoardRepository;
pub use service::{
    validate_content, BoardService, PaginatedResult, Pagination, MAX_BOARD_NAME_LENGTH,
    MAX_CONTENT_LENGTH, PAGE_SIZE, SECRET_FIELD,
};
pub use types::{Board, BoardAccess, BoardUpdate, Membership, NewBoard};
