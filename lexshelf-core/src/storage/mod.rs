//! Storage abstraction for library snapshots and catalog documents

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract key/value blob storage
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read data from the given path
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write data to the given path, replacing it atomically
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Delete data at the given path
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// List entries under the given prefix
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;
}

/// Local filesystem storage provider
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path under the root, rejecting traversal
    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::PermissionDenied(format!(
                        "path escapes storage root: {}",
                        path
                    )));
                }
            }
        }
        Ok(self.root.join(normalized))
    }
}

fn map_io(path: &Path, err: std::io::Error) -> StorageError {
    match err.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        std::io::ErrorKind::PermissionDenied => {
            StorageError::PermissionDenied(path.display().to_string())
        }
        _ => StorageError::BackendError(err.to_string()),
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| map_io(&full_path, e))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io(parent, e))?;
        }
        // Write to a sibling temp file then rename so readers never see a partial write
        let mut temp_name = full_path.clone().into_os_string();
        temp_name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        let temp_path = PathBuf::from(temp_name);
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| map_io(&temp_path, e))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| map_io(&full_path, e))
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        tokio::fs::remove_file(&full_path)
            .await
            .map_err(|e| map_io(&full_path, e))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let full_path = self.full_path(prefix)?;
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&full_path)
            .await
            .map_err(|e| map_io(&full_path, e))?;

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?
        {
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        tokio::fs::try_exists(&full_path)
            .await
            .map_err(|e| map_io(&full_path, e))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::BackendError("memory storage lock poisoned".to_string())
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(|_| Self::poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(path.to_string(), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage
            .write("snapshots/library.json", b"{}".to_vec())
            .await
            .unwrap();
        assert_eq!(storage.read("snapshots/library.json").await.unwrap(), b"{}");
        assert!(storage.exists("snapshots/library.json").await.unwrap());
        assert_eq!(
            storage.list("snapshots/").await.unwrap(),
            vec!["snapshots/library.json".to_string()]
        );

        storage.delete("snapshots/library.json").await.unwrap();
        assert!(!storage.exists("snapshots/library.json").await.unwrap());
        assert!(matches!(
            storage.read("snapshots/library.json").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .write("nested/catalog.json", b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(storage.read("nested/catalog.json").await.unwrap(), b"[]");
        assert_eq!(
            storage.list("nested").await.unwrap(),
            vec!["catalog.json".to_string()]
        );
        assert!(matches!(
            storage.read("missing.json").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_concurrent_writes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = std::sync::Arc::new(LocalStorage::new(dir.path()));

        let writes: Vec<_> = (0..16u8)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move { storage.write("library.json", vec![i; 4096]).await })
            })
            .collect();
        for write in writes {
            write.await.unwrap().unwrap();
        }

        let data = storage.read("library.json").await.unwrap();
        assert_eq!(data.len(), 4096);
        assert!(data.iter().all(|b| *b == data[0]));
        assert_eq!(
            storage.list("").await.unwrap(),
            vec!["library.json".to_string()]
        );
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.read("../etc/passwd").await,
            Err(StorageError::PermissionDenied(_))
        ));
    }
}
