//! Remote catalog boundary
//!
//! A remote source supplies books and sections. The library replaces its
//! catalog only when every fetch succeeds; see [`crate::Library::refresh`].

use crate::error::FetchError;
use crate::storage::StorageProvider;
use crate::types::{Book, BookId, Section};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result type for remote fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Source of catalog records
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// All books
    async fn fetch_books(&self) -> FetchResult<Vec<Book>>;

    /// Sections of one book in catalog order
    async fn fetch_sections(&self, book_id: BookId) -> FetchResult<Vec<Section>>;
}

/// Serialized form of a whole catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    pub books: Vec<Book>,
    pub sections: Vec<Section>,
}

impl CatalogDocument {
    fn sections_of(&self, book_id: BookId) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| s.book_id == book_id)
            .cloned()
            .collect()
    }
}

/// Catalog served from memory, with a switch to simulate outages
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    document: CatalogDocument,
    offline: Arc<AtomicBool>,
}

impl StaticCatalog {
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every fetch fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> FetchResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(FetchError::Unavailable("catalog source is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteCatalog for StaticCatalog {
    async fn fetch_books(&self) -> FetchResult<Vec<Book>> {
        self.check_online()?;
        Ok(self.document.books.clone())
    }

    async fn fetch_sections(&self, book_id: BookId) -> FetchResult<Vec<Section>> {
        self.check_online()?;
        Ok(self.document.sections_of(book_id))
    }
}

/// Catalog read from a JSON [`CatalogDocument`] in storage
pub struct StorageCatalog {
    storage: Arc<dyn StorageProvider>,
    path: String,
}

impl StorageCatalog {
    pub fn new(storage: Arc<dyn StorageProvider>, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    async fn load(&self) -> FetchResult<CatalogDocument> {
        let data = self
            .storage
            .read(&self.path)
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;
        serde_json::from_slice(&data).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RemoteCatalog for StorageCatalog {
    async fn fetch_books(&self) -> FetchResult<Vec<Book>> {
        Ok(self.load().await?.books)
    }

    async fn fetch_sections(&self, book_id: BookId) -> FetchResult<Vec<Section>> {
        Ok(self.load().await?.sections_of(book_id))
    }
}
