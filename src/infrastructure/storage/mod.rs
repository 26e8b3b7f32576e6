// ============================================================
// BLOB STORAGE
// ============================================================
// Raw upload bytes, addressed by storage key

use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Location of a stored object
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub url: String,
}

/// Storage for the original upload bytes
#[async_trait]
pub trait BlobStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<StoredObject>;
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Blob store rooted at a local directory
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<StoredObject> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::StorageError(format!("Failed to write object {}: {}", key, e)))?;

        Ok(StoredObject {
            url: format!("file://{}", path.display()),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(key);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("No stored object for key: {}", key))
            } else {
                AppError::StorageError(format!("Failed to read object {}: {}", key, e))
            }
        })
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| AppError::StorageError(format!("Failed to create directory: {}", e)))?;
    }
    Ok(())
}

/// In-memory blob store for tests and ephemeral runs
#[derive(Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<StoredObject> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), bytes.to_vec());
        Ok(StoredObject {
            url: format!("memory://{}", key),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No stored object for key: {}", key)))
    }
}
