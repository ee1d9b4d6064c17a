//! Persistence for the bearer token between runs.
//!
//! [`FileTokenStore`] behaves like the browser cookie it stands in for: the
//! token is written with an expiry (7 days by default) and silently dropped
//! once that has passed.

use super::SessionError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The persisted token, if one exists and has not expired.
    async fn load(&self) -> Result<Option<String>, SessionError>;

    async fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Removes the token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local store, for tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().clone())
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock() = Some(token.to_owned());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// JSON file holding the token and its expiry.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };
        let stored: StoredToken = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                info!(error = %e, path = %self.path.display(), "Discarding unreadable token file");
                self.clear().await?;
                return Ok(None);
            }
        };
        if stored.expires_at <= Utc::now() {
            info!(expired_at = %stored.expires_at, "Persisted token expired");
            self.clear().await?;
            return Ok(None);
        }
        Ok(Some(stored.token))
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| SessionError::Storage(format!("token lifetime out of range: {}", self.ttl)))?;
        let stored = StoredToken {
            token: token.to_owned(),
            expires_at,
        };
        let raw =
            serde_json::to_string(&stored).map_err(|e| SessionError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        debug!(path = %self.path.display(), expires_at = %stored.expires_at, "Token persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rema-client-{}-{}", std::process::id(), name))
            .join("session.json")
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let store = FileTokenStore::new(&path, Duration::days(7));

        assert_eq!(store.load().await.unwrap(), None);
        store.save("abc").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("abc"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_expired_token_is_dropped() {
        let path = temp_path("expired");
        let store = FileTokenStore::new(&path, Duration::days(-1));

        store.save("stale").await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_dropped() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path, Duration::days(7));
        assert_eq!(store.load().await.unwrap(), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_unrepresentable_expiry_is_an_error() {
        let path = temp_path("overflow");
        let store = FileTokenStore::new(&path, Duration::days(1_000_000_000));

        let err = store.save("abc").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.load().await.unwrap().as_deref(), Some("abc"));
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }
}
