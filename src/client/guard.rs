//! Navigation guard for protected client routes.

use std::sync::Arc;

use super::error::ClientResult;
use super::session::SessionStore;

/// Route unauthenticated users are sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation may proceed.
    Allow,
    /// Navigation is redirected to the given route.
    Redirect(String),
}

/// Gate that only lets sessions with a stored token through.
///
/// The check is presence-only; token validity is left to the server.
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Decide whether navigation to a protected route may proceed.
    pub fn can_activate(&self) -> ClientResult<GuardDecision> {
        if self.session.has_token()? {
            Ok(GuardDecision::Allow)
        } else {
            Ok(GuardDecision::Redirect(LOGIN_ROUTE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemorySessionStore;

    #[test]
    fn test_redirects_without_token() {
        let store = Arc::new(MemorySessionStore::new());
        let guard = RouteGuard::new(store.clone());

        assert_eq!(
            guard.can_activate().unwrap(),
            GuardDecision::Redirect("/login".to_string())
        );

        store.store("anything").unwrap();
        assert_eq!(guard.can_activate().unwrap(), GuardDecision::Allow);
    }
}
