//! Session token storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::error::{ClientError, ClientResult};

/// Key under which the access token is persisted.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage for the current session's access token.
pub trait SessionStore: Send + Sync {
    /// Read the stored token, if any.
    fn token(&self) -> ClientResult<Option<String>>;

    /// Store a token, replacing any previous one.
    fn store(&self, token: &str) -> ClientResult<()>;

    /// Remove the stored token.
    fn clear(&self) -> ClientResult<()>;

    /// Whether a token is currently stored.
    fn has_token(&self) -> ClientResult<bool> {
        Ok(self.token()?.is_some())
    }
}

/// Session store kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> ClientError {
    ClientError::Session("session lock poisoned".to_string())
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.token.read().map_err(poisoned)?.clone())
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        *self.token.write().map_err(poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.write().map_err(poisoned)? = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    auth_token: String,
}

/// Session store persisted as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> ClientResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) if !session.auth_token.is_empty() => Ok(Some(session.auth_token)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(&StoredSession {
            auth_token: token.to_string(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert!(!store.has_token().unwrap());

        store.store("abc").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        store.store("def").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("def"));

        store.clear().unwrap();
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        FileSessionStore::new(&path).store("token-1").unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.token().unwrap().as_deref(), Some("token-1"));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(AUTH_TOKEN_KEY));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert!(reopened.token().unwrap().is_none());
        // Clearing twice is fine.
        reopened.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileSessionStore::new(&path).token().unwrap().is_none());
    }
}
