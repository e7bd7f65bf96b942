//! Board and membership models for Corkboard.
//!
//! A board has no owner column; every user relationship goes through a
//! [`Membership`] row (the `user_boards` table).

/// Board entity: a named collection of posts.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Membership linking a user to a board.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Membership {
    /// Unique membership ID.
    pub id: i64,
    /// Member user ID.
    pub user_id: i64,
    /// Board ID.
    pub board_id: i64,
    /// Whether the member owns the board (update/destroy/share rights).
    pub is_admin: bool,
    /// Argon2 hash of the shared-access secret. Only admin rows carry one.
    pub encrypted_password: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A board together with one user's membership of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardAccess {
    pub board: Board,
    pub membership: Membership,
}

impl BoardAccess {
    /// Whether the member owns the board.
    pub fn is_admin(&self) -> bool {
        self.membership.is_admin
    }
}

/// Data for creating a new board.
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    /// Board name (required).
    pub name: Option<String>,
    /// Plain shared-access secret (required).
    pub password: Option<String>,
}

impl NewBoard {
    /// Create a new board request with both fields set.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            password: Some(password.into()),
        }
    }
}

/// Data for updating a board and its admin membership.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    /// New board name.
    pub name: Option<String>,
    /// New plain shared-access secret.
    pub password: Option<String>,
}

impl BoardUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new shared-access secret.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_update_builder() {
        assert!(BoardUpdate::new().is_empty());

        let update = BoardUpdate::new().name("Team").password("secret");
        assert!(!update.is_empty());
        assert_eq!(update.name.as_deref(), Some("Team"));
        assert_eq!(update.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_new_board() {
        let board = NewBoard::new("Team", "secret");
        assert_eq!(board.name.as_deref(), Some("Team"));
        assert_eq!(board.password.as_deref(), Some("secret"));
    }
}
