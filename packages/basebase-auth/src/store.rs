//! Durable storage for the session token.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// A single durable slot holding the bearer token between runs.
///
/// Best-effort convenience, not the system of record (the server is):
/// implementations must treat unavailable storage as an empty slot rather
/// than an error, and an absent token is a normal signed-out state, never
/// worth logging above debug.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn save(&self, token: &str);
    async fn load(&self) -> Option<String>;
    async fn clear(&self);
}

/// In-memory slot, for tests and callers that do not want resume across
/// restarts.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &str) {
        *self.slot.write().await = Some(token.to_string());
    }

    async fn load(&self) -> Option<String> {
        self.slot.read().await.clone()
    }

    async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

/// File-backed slot: the token is the entire file contents.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %self.path.display(), error = %err, "could not create token directory");
                return;
            }
        }
        if let Err(err) = tokio::fs::write(&self.path, token).await {
            tracing::warn!(path = %self.path.display(), error = %err, "could not persist token");
        }
    }

    async fn load(&self) -> Option<String> {
        // A missing file is the normal signed-out state.
        let contents = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    async fn clear(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "could not clear token");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("basebase-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await, None);

        store.save("tok_123").await;
        assert_eq!(store.load().await.as_deref(), Some("tok_123"));

        store.clear().await;
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryTokenStore::new();
        store.save("first").await;
        store.save("second").await;
        assert_eq!(store.load().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let store = FileTokenStore::new(scratch_path("round-trip"));

        store.save("tok_abc").await;
        assert_eq!(store.load().await.as_deref(), Some("tok_abc"));

        store.clear().await;
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn test_file_store_trims_whitespace() {
        let path = scratch_path("trims");
        tokio::fs::write(&path, "  tok_abc\n").await.unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().await.as_deref(), Some("tok_abc"));

        store.clear().await;
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_absent() {
        let path = scratch_path("empty");
        tokio::fs::write(&path, "\n").await.unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().await, None);

        store.clear().await;
    }

    #[tokio::test]
    async fn test_clearing_a_missing_file_is_a_no_op() {
        let store = FileTokenStore::new(scratch_path("never-written"));
        store.clear().await;
        assert_eq!(store.load().await, None);
    }
}
