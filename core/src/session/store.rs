//! Persistence for the remembered identity.
//!
//! The front-end this contract mirrors kept a single key in browser storage;
//! here that is one JSON file under the data directory. The store is a trait
//! object so a real backend can replace it without touching the manager.

use crate::session::state::Identity;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// File name of the remembered-identity record inside the data directory.
pub const REMEMBERED_FILE: &str = "remembered_user.json";

/// Identity store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access identity record: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed identity record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage for the single remembered identity record.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Read the persisted record, if any. A malformed record is an error;
    /// a missing record is `Ok(None)`.
    async fn load(&self) -> Result<Option<Identity>, StoreError>;

    /// Persist the record, replacing any previous one.
    async fn save(&self, identity: &Identity) -> Result<(), StoreError>;

    /// Remove the persisted record. Removing a non-existent record is not
    /// an error.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Identity store backed by a JSON file.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store the record as `remembered_user.json` inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(REMEMBERED_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IdentityStore for FileIdentityStore {
    async fn load(&self) -> Result<Option<Identity>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let identity: Identity = serde_json::from_slice(&raw)?;
        Ok(Some(identity))
    }

    async fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(identity)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Saved remembered identity to {:?}", self.path);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory identity store for tests and ephemeral runs.
///
/// Holds the raw JSON rather than the parsed identity so corrupted records
/// can be injected the same way a stale file would present them.
#[derive(Default)]
pub struct MemoryIdentityStore {
    slot: RwLock<Option<String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored record with raw bytes, bypassing serialization.
    pub async fn put_raw(&self, raw: impl Into<String>) {
        *self.slot.write().await = Some(raw.into());
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn load(&self) -> Result<Option<Identity>, StoreError> {
        let slot = self.slot.read().await;
        match slot.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        let json = serde_json::to_string(identity)?;
        *self.slot.write().await = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::mock_identity;

    #[tokio::test]
    async fn test_file_store_missing_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path());

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path());
        let identity = mock_identity("admin@servicehub.com");

        store.save(&identity).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, Some(identity));
    }

    #[tokio::test]
    async fn test_file_store_malformed_record_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path());
        tokio::fs::write(store.path(), b"{not json")
            .await
            .unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path());

        store.clear().await.unwrap();

        store.save(&mock_identity("user@x.com")).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryIdentityStore::new();
        let identity = mock_identity("fornecedor@x.com");

        store.save(&identity).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(identity));

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_store_corrupt_record() {
        let store = MemoryIdentityStore::new();
        store.put_raw("][").await;

        assert!(matches!(store.load().await, Err(StoreError::Malformed(_))));
    }
}
