//! Membership repository for Corkboard.

use super::types::Membership;
use crate::db::DbPool;
use crate::{CorkboardError, Result};

/// Repository for `user_boards` rows.
pub struct MembershipRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MembershipRepository<'a> {
    /// Create a new MembershipRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Get a user's membership of a board.
    pub async fn get(&self, user_id: i64, board_id: i64) -> Result<Option<Membership>> {
        let result = sqlx::query_as::<_, Membership>(
            "SELECT id, user_id, board_id, is_admin, encrypted_password, created_at, updated_at
             FROM user_boards WHERE user_id = ? AND board_id = ?",
        )
        .bind(user_id)
        .bind(board_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Grant a user shared (non-admin) access to a board.
    ///
    /// If the user is already a member the existing membership is returned
    /// unchanged, with `false` as the second element.
    pub async fn add_member(&self, user_id: i64, board_id: i64) -> Result<(Membership, bool)> {
        let inserted = sqlx::query(
            "INSERT INTO user_boards (user_id, board_id, is_admin) VALUES (?, ?, 0)
             ON CONFLICT (user_id, board_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(board_id)
        .execute(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?
        .rows_affected()
            > 0;

        let membership = self
            .get(user_id, board_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("membership".to_string()))?;

        Ok((membership, inserted))
    }

    /// The board's shared-access secret hash, taken from its oldest admin
    /// membership that carries one.
    pub async fn shared_secret(&self, board_id: i64) -> Result<Option<String>> {
        let hash: Option<String> = sqlx::query_scalar(
            "SELECT encrypted_password FROM user_boards
             WHERE board_id = ? AND is_admin = 1 AND encrypted_password IS NOT NULL
             ORDER BY id LIMIT 1",
        )
        .bind(board_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| CorkboardError::Database(e.to_string()))?;

        Ok(hash)
    }

    /// Count members of a board.
    pub async fn count_for_board(&self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_boards WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| CorkboardError::Database(e.to_string()))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardRepository;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, i64, i64, i64) {
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
        let access = BoardRepository::new(db.pool())
            .create_with_admin(alice.id, "Team", "secret-hash")
            .await
            .unwrap();
        (db, alice.id, bob.id, access.board.id)
    }

    #[tokio::test]
    async fn test_get_membership() {
        let (db, alice, bob, board) = setup().await;
        let repo = MembershipRepository::new(db.pool());

        assert!(repo.get(alice, board).await.unwrap().unwrap().is_admin);
        assert!(repo.get(bob, board).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_member_is_idempotent() {
        let (db, _, bob, board) = setup().await;
        let repo = MembershipRepository::new(db.pool());

        let (membership, created) = repo.add_member(bob, board).await.unwrap();
        assert!(created);
        assert!(!membership.is_admin);
        assert!(membership.encrypted_password.is_none());

        let (again, created) = repo.add_member(bob, board).await.unwrap();
        assert!(!created);
        assert_eq!(again.id, membership.id);
        assert_eq!(repo.count_for_board(board).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_shared_secret() {
        let (db, _, bob, board) = setup().await;
        let repo = MembershipRepository::new(db.pool());
        repo.add_member(bob, board).await.unwrap();

        assert_eq!(
            repo.shared_secret(board).await.unwrap().as_deref(),
            Some("secret-hash")
        );
        assert!(repo.shared_secret(board + 1).await.unwrap().is_none());
    }
}
