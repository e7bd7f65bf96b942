//! Board service for Corkboard.
//!
//! This module provides high-level operations for boards, posts and comments:
//! input validation, membership rules and pagination. Callers are expected to
//! have resolved the caller's [`BoardAccess`] first (see [`super::access`]).

use tracing::info;

use crate::auth::{hash_secret, verify_password, MAX_PASSWORD_LENGTH};
use crate::auth::validation::{too_long, BLANK};
use crate::db::{Database, UserRepository};
use crate::error::FieldErrors;
use crate::{CorkboardError, Result};

use super::access::ensure_author;
use super::comment_repository::CommentRepository;
use super::membership::MembershipRepository;
use super::post::{Comment, NewComment, NewPost, Post};
use super::post_repository::PostRepository;
use super::repository::BoardRepository;
use super::types::{BoardAccess, BoardUpdate, NewBoard};

/// Number of items per page for post and comment listings.
pub const PAGE_SIZE: i64 = 20;

/// Maximum length for board names (in characters).
pub const MAX_BOARD_NAME_LENGTH: usize = 100;

/// Maximum length for post and comment content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Field name under which access-secret errors are reported.
pub const SECRET_FIELD: &str = "encrypted_password";

fn validate_board_name(name: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.add("name", BLANK);
        return None;
    }
    if name.chars().count() > MAX_BOARD_NAME_LENGTH {
        errors.add("name", too_long(MAX_BOARD_NAME_LENGTH));
        return None;
    }
    Some(name.to_string())
}

fn validate_secret(secret: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
    let secret = secret.unwrap_or_default();
    if secret.trim().is_empty() {
        errors.add(SECRET_FIELD, BLANK);
        return None;
    }
    if secret.chars().count() > MAX_PASSWORD_LENGTH {
        errors.add(SECRET_FIELD, too_long(MAX_PASSWORD_LENGTH));
        return None;
    }
    Some(secret.to_string())
}

/// Validate post or comment content, returning it trimmed.
pub fn validate_content(content: Option<&str>) -> Result<String> {
    let mut errors = FieldErrors::new();
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        errors.add("content", BLANK);
    } else if content.chars().count() > MAX_CONTENT_LENGTH {
        errors.add("content", too_long(MAX_CONTENT_LENGTH));
    }
    errors.into_result()?;
    Ok(content.to_string())
}

fn hash_board_secret(secret: &str) -> Result<String> {
    hash_secret(secret).map_err(|e| CorkboardError::Validation(e.to_string()))
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Pagination {
    /// Create new pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Pagination for a 1-based page of [`PAGE_SIZE`] items.
    ///
    /// Pages below 1 are treated as the first page.
    pub fn page(page: i64) -> Self {
        let page = page.max(1);
        Self::new((page - 1).saturating_mul(PAGE_SIZE), PAGE_SIZE)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::page(1)
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// The 1-based page number.
    pub fn page(&self) -> i64 {
        if self.limit <= 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }

    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

/// Service for board, post and comment operations.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List every board the user is a member of.
    pub async fn list_boards(&self, user_id: i64) -> Result<Vec<BoardAccess>> {
        BoardRepository::new(self.db.pool())
            .list_for_user(user_id)
            .await
    }

    /// Create a board owned by `user_id`.
    ///
    /// Both the name and the access secret are required. On any validation
    /// error nothing is persisted.
    pub async fn create_board(&self, user_id: i64, new_board: NewBoard) -> Result<BoardAccess> {
        let mut errors = FieldErrors::new();
        let name = validate_board_name(new_board.name.as_deref(), &mut errors);
        let secret = validate_secret(new_board.password.as_deref(), &mut errors);
        errors.into_result()?;

        let (Some(name), Some(secret)) = (name, secret) else {
            return Err(CorkboardError::Validation("invalid board".to_string()));
        };
        let secret_hash = hash_board_secret(&secret)?;

        let access = BoardRepository::new(self.db.pool())
            .create_with_admin(user_id, &name, &secret_hash)
            .await?;

        info!(board_id = access.board.id, user_id, "Board created");
        Ok(access)
    }

    /// Update a board's name and/or access secret.
    ///
    /// Errors for both fields are reported together.
    pub async fn update_board(&self, access: &BoardAccess, update: BoardUpdate) -> Result<BoardAccess> {
        let mut errors = FieldErrors::new();
        let name = update
            .name
            .as_deref()
            .and_then(|n| validate_board_name(Some(n), &mut errors));
        let secret = update
            .password
            .as_deref()
            .and_then(|s| validate_secret(Some(s), &mut errors));
        errors.into_result()?;

        let secret_hash = secret.as_deref().map(hash_board_secret).transpose()?;

        let repo = BoardRepository::new(self.db.pool());
        repo.update(
            access.board.id,
            access.membership.id,
            name.as_deref(),
            secret_hash.as_deref(),
        )
        .await?;

        repo.get_access(access.membership.user_id, access.board.id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))
    }

    /// Delete a board and everything on it.
    pub async fn delete_board(&self, board_id: i64) -> Result<()> {
        if !BoardRepository::new(self.db.pool()).delete(board_id).await? {
            return Err(CorkboardError::NotFound("board".to_string()));
        }
        info!(board_id, "Board deleted");
        Ok(())
    }

    /// Grant the user registered under `email` shared access to a board.
    ///
    /// Returns the member's access and whether a membership was created.
    pub async fn share_board(&self, board_id: i64, email: &str) -> Result<(BoardAccess, bool)> {
        let user = UserRepository::new(self.db.pool())
            .get_by_email(email.trim())
            .await?
            .ok_or_else(|| CorkboardError::NotFound("user".to_string()))?;

        let (_, created) = MembershipRepository::new(self.db.pool())
            .add_member(user.id, board_id)
            .await?;

        if created {
            info!(board_id, user_id = user.id, "Board shared");
        }
        let access = self.member_access(user.id, board_id).await?;
        Ok((access, created))
    }

    /// Join a board by presenting its shared-access secret.
    ///
    /// Returns the caller's access and whether a membership was created.
    pub async fn join_board(
        &self,
        board_id: i64,
        user_id: i64,
        secret: &str,
    ) -> Result<(BoardAccess, bool)> {
        let repo = BoardRepository::new(self.db.pool());
        if repo.get_by_id(board_id).await?.is_none() {
            return Err(CorkboardError::NotFound("board".to_string()));
        }
        if let Some(access) = repo.get_access(user_id, board_id).await? {
            return Ok((access, false));
        }

        let memberships = MembershipRepository::new(self.db.pool());
        let hash = memberships
            .shared_secret(board_id)
            .await?
            .ok_or_else(|| CorkboardError::Permission("board is not shared".to_string()))?;
        verify_password(secret, &hash)
            .map_err(|_| CorkboardError::Permission("invalid board password".to_string()))?;

        memberships.add_member(user_id, board_id).await?;
        info!(board_id, user_id, "User joined board");

        let access = self.member_access(user_id, board_id).await?;
        Ok((access, true))
    }

    async fn member_access(&self, user_id: i64, board_id: i64) -> Result<BoardAccess> {
        BoardRepository::new(self.db.pool())
            .get_access(user_id, board_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("membership".to_string()))
    }

    /// List posts in a board, newest first.
    pub async fn list_posts(&self, board_id: i64, pagination: Pagination) -> Result<PaginatedResult<Post>> {
        let repo = PostRepository::new(self.db.pool());
        let total = repo.count_by_board(board_id).await?;
        let items = repo
            .list_by_board_paginated(board_id, pagination.offset, pagination.limit)
            .await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    /// Get a post that belongs to the given board.
    pub async fn get_post(&self, board_id: i64, post_id: i64) -> Result<Post> {
        PostRepository::new(self.db.pool())
            .get_by_id(post_id)
            .await?
            .filter(|post| post.board_id == board_id)
            .ok_or_else(|| CorkboardError::NotFound("post".to_string()))
    }

    /// Create a post on a board.
    pub async fn create_post(&self, board_id: i64, user_id: i64, content: Option<&str>) -> Result<Post> {
        let content = validate_content(content)?;
        PostRepository::new(self.db.pool())
            .create(&NewPost::new(board_id, user_id, content))
            .await
    }

    /// Update a post's content. Only its author may do this.
    pub async fn update_post(
        &self,
        board_id: i64,
        post_id: i64,
        user_id: i64,
        content: Option<&str>,
    ) -> Result<Post> {
        let post = self.get_post(board_id, post_id).await?;
        ensure_author("post", post.user_id, user_id)?;
        let content = validate_content(content)?;

        PostRepository::new(self.db.pool())
            .update_content(post.id, &content)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("post".to_string()))
    }

    /// Delete a post. Only its author may do this.
    pub async fn delete_post(&self, board_id: i64, post_id: i64, user_id: i64) -> Result<()> {
        let post = self.get_post(board_id, post_id).await?;
        ensure_author("post", post.user_id, user_id)?;
        PostRepository::new(self.db.pool()).delete(post.id).await?;
        Ok(())
    }

    /// List comments on a post, oldest first.
    pub async fn list_comments(
        &self,
        board_id: i64,
        post_id: i64,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Comment>> {
        let post = self.get_post(board_id, post_id).await?;

        let repo = CommentRepository::new(self.db.pool());
        let total = repo.count_by_post(post.id).await?;
        let items = repo
            .list_by_post_paginated(post.id, pagination.offset, pagination.limit)
            .await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    /// Comment on a post.
    pub async fn create_comment(
        &self,
        board_id: i64,
        post_id: i64,
        user_id: i64,
        content: Option<&str>,
    ) -> Result<Comment> {
        let post = self.get_post(board_id, post_id).await?;
        let content = validate_content(content)?;

        CommentRepository::new(self.db.pool())
            .create(&NewComment::new(post.id, user_id, content))
            .await
    }

    async fn get_comment(&self, board_id: i64, post_id: i64, comment_id: i64) -> Result<Comment> {
        let post = self.get_post(board_id, post_id).await?;
        CommentRepository::new(self.db.pool())
            .get_by_id(comment_id)
            .await?
            .filter(|comment| comment.post_id == post.id)
            .ok_or_else(|| CorkboardError::NotFound("comment".to_string()))
    }

    /// Update a comment's content. Only its author may do this.
    pub async fn update_comment(
        &self,
        board_id: i64,
        post_id: i64,
        comment_id: i64,
        user_id: i64,
        content: Option<&str>,
    ) -> Result<Comment> {
        let comment = self.get_comment(board_id, post_id, comment_id).await?;
        ensure_author("comment", comment.user_id, user_id)?;
        let content = validate_content(content)?;

        CommentRepository::new(self.db.pool())
            .update_content(comment.id, &content)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("comment".to_string()))
    }

    /// Delete a comment. Only its author may do this.
    pub async fn delete_comment(
        &self,
        board_id: i64,
        post_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<()> {
        let comment = self.get_comment(board_id, post_id, comment_id).await?;
        ensure_author("comment", comment.user_id, user_id)?;
        CommentRepository::new(self.db.pool())
            .delete(comment.id)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewUser;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let alice = users
            .create(&NewUser::new("Alice", "alice@example.com", "h"))
            .await
            .unwrap();
        let bob = users
            .create(&NewUser::new("Bob", "bob@example.com", "h"))
            .await
            .unwrap();
        (db, alice.id, bob.id)
    }

    fn field_errors(result: Result<impl std::fmt::Debug>) -> FieldErrors {
        match result {
            Err(CorkboardError::InvalidFields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_pagination_page() {
        let p = Pagination::page(1);
        assert_eq!((p.offset, p.limit), (0, PAGE_SIZE));
        let p = Pagination::page(3);
        assert_eq!(p.offset, 40);
        let p = Pagination::page(0);
        assert_eq!(p.offset, 0);
        let p = Pagination::page(-5);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_paginated_result_page() {
        let result = PaginatedResult {
            items: vec![1; 5],
            total: 25,
            offset: 20,
            limit: 20,
        };
        assert_eq!(result.page(), 2);
        assert!(!result.has_more());
    }

    #[test]
    fn test_validate_content() {
        assert_eq!(validate_content(Some("  hi  ")).unwrap(), "hi");
        let errors = field_errors(validate_content(None));
        assert_eq!(errors.get("content").unwrap(), [BLANK]);
        let errors = field_errors(validate_content(Some("   ")));
        assert_eq!(errors.get("content").unwrap(), [BLANK]);
        assert!(validate_content(Some(&"x".repeat(MAX_CONTENT_LENGTH + 1))).is_err());
    }

    #[tokio::test]
    async fn test_create_board_requires_name_and_secret() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let errors = field_errors(service.create_board(alice, NewBoard::default()).await);
        assert!(errors.get("name").is_some());
        assert!(errors.get(SECRET_FIELD).is_some());

        assert!(service.list_boards(alice).await.unwrap().is_empty());
        assert_eq!(BoardRepository::new(db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_board_trims_name() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let access = service
            .create_board(alice, NewBoard::new("  Team  ", "secret"))
            .await
            .unwrap();
        assert_eq!(access.board.name, "Team");
        assert!(access.is_admin());
        let hash = access.membership.encrypted_password.unwrap();
        assert!(verify_password("secret", &hash).is_ok());
    }

    #[tokio::test]
    async fn test_update_board_aggregates_errors() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);
        let access = service
            .create_board(alice, NewBoard::new("Team", "secret"))
            .await
            .unwrap();

        let update = BoardUpdate::new()
            .name("")
            .password("p".repeat(MAX_PASSWORD_LENGTH + 1));
        let errors = field_errors(service.update_board(&access, update).await);
        assert!(errors.get("name").is_some());
        assert!(errors.get(SECRET_FIELD).is_some());

        let unchanged = service.list_boards(alice).await.unwrap();
        assert_eq!(unchanged[0].board.name, "Team");
    }

    #[tokio::test]
    async fn test_join_board_with_secret() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let access = service
            .create_board(alice, NewBoard::new("Team", "secret"))
            .await
            .unwrap();
        let board_id = access.board.id;

        let wrong = service.join_board(board_id, bob, "guess").await;
        assert!(matches!(wrong, Err(CorkboardError::Permission(_))));

        let (joined, created) = service.join_board(board_id, bob, "secret").await.unwrap();
        assert!(created);
        assert!(!joined.is_admin());

        let (_, created) = service.join_board(board_id, bob, "anything").await.unwrap();
        assert!(!created);

        let missing = service.join_board(board_id + 1, bob, "secret").await;
        assert!(matches!(missing, Err(CorkboardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_share_board_unknown_user() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);
        let access = service
            .create_board(alice, NewBoard::new("Team", "secret"))
            .await
            .unwrap();

        let result = service.share_board(access.board.id, "nobody@example.com").await;
        assert!(matches!(result, Err(CorkboardError::NotFound(_))));

        let (shared, created) = service
            .share_board(access.board.id, "BOB@example.com")
            .await
            .unwrap();
        assert!(created);
        assert_eq!(shared.board.id, access.board.id);
    }

    #[tokio::test]
    async fn test_post_belongs_to_board() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);
        let first = service
            .create_board(alice, NewBoard::new("First", "s"))
            .await
            .unwrap();
        let second = service
            .create_board(alice, NewBoard::new("Second", "s"))
            .await
            .unwrap();

        let post = service
            .create_post(first.board.id, alice, Some("hello"))
            .await
            .unwrap();
        assert!(service.get_post(first.board.id, post.id).await.is_ok());
        assert!(matches!(
            service.get_post(second.board.id, post.id).await,
            Err(CorkboardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_only_author_modifies_comment() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let access = service
            .create_board(alice, NewBoard::new("Team", "secret"))
            .await
            .unwrap();
        let board_id = access.board.id;
        service.join_board(board_id, bob, "secret").await.unwrap();

        let post = service.create_post(board_id, alice, Some("post")).await.unwrap();
        let comment = service
            .create_comment(board_id, post.id, bob, Some("mine"))
            .await
            .unwrap();

        let by_admin = service
            .update_comment(board_id, post.id, comment.id, alice, Some("hijack"))
            .await;
        assert!(matches!(by_admin, Err(CorkboardError::Permission(_))));
        let by_admin = service
            .delete_comment(board_id, post.id, comment.id, alice)
            .await;
        assert!(matches!(by_admin, Err(CorkboardError::Permission(_))));

        let edited = service
            .update_comment(board_id, post.id, comment.id, bob, Some("edited"))
            .await
            .unwrap();
        assert_eq!(edited.content, "edited");

        service
            .delete_comment(board_id, post.id, comment.id, bob)
            .await
            .unwrap();
        let remaining = service
            .list_comments(board_id, post.id, Pagination::default())
            .await
            .unwrap();
        assert_eq!(remaining.total, 0);
    }
}
