//! Application state

use anyhow::Result;
use lexshelf_core::identity::{IdentityProvider, LocalIdentityProvider};
use lexshelf_core::seed::seed_library;
use lexshelf_core::storage::{LocalStorage, StorageProvider};
use lexshelf_core::{BookId, Library, LibraryConfig, SectionId, TagId, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// Storage key of the library snapshot
pub const LIBRARY_SNAPSHOT: &str = "library.json";

/// Storage key of the catalog document used for refreshes
pub const CATALOG_DOCUMENT: &str = "catalog.json";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage for snapshots and catalog documents
    pub storage: Arc<dyn StorageProvider>,

    /// The library, guarded for the duration of synchronous store calls
    pub library: Arc<RwLock<Library>>,

    /// Held across serializing and writing a snapshot so saves land in order
    save_lock: Arc<Mutex<()>>,

    /// Session and profile service
    pub identity: Arc<dyn IdentityProvider>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A book was pinned or unpinned
    PinToggled { book_id: BookId, pinned: bool },

    /// A section was added to or removed from favorites
    FavoriteToggled { section_id: SectionId, favorite: bool },

    /// A tag was created, edited, deleted or had its members changed
    TagChanged { tag_id: TagId },

    /// Reading preferences or theme changed
    PreferencesChanged,

    /// The catalog was replaced from the catalog document
    CatalogRefreshed { books: usize, sections: usize },

    /// An error occurred
    Error { message: String },
}

impl AppState {
    /// Create new application state
    pub async fn new() -> Result<Self> {
        // Default to local storage in current directory
        let storage_path = std::env::var("LEXSHELF_STORAGE_PATH")
            .unwrap_or_else(|_| "./lexshelf_data".to_string());
        let storage_path = PathBuf::from(storage_path);
        tokio::fs::create_dir_all(&storage_path).await?;

        let theme = match std::env::var("LEXSHELF_THEME") {
            Ok(value) => value.parse::<Theme>().map_err(anyhow::Error::msg)?,
            Err(_) => Theme::default(),
        };
        let config = LibraryConfig {
            theme,
            ..LibraryConfig::default()
        };

        let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorage::new(&storage_path));

        // Load the library snapshot, seeding a fresh one on first start
        let library = match Library::load(storage.as_ref(), LIBRARY_SNAPSHOT).await {
            Ok(Some(library)) => library,
            Ok(None) => {
                tracing::info!("No library snapshot found, seeding demo catalog");
                seed_library(config)?
            }
            Err(e) => {
                tracing::warn!("Failed to load library snapshot, starting fresh: {}", e);
                seed_library(config)?
            }
        };

        Ok(Self::with_library(storage, library))
    }

    /// Assemble state around an existing library
    pub fn with_library(storage: Arc<dyn StorageProvider>, library: Library) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            storage,
            library: Arc::new(RwLock::new(library)),
            save_lock: Arc::new(Mutex::new(())),
            identity: Arc::new(LocalIdentityProvider::new()),
            event_tx,
        }
    }

    /// Save the library snapshot
    pub async fn save_library(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        // The read lock is released before the write; a later save waits on the guard
        let data = self.library.read().await.to_json()?;
        self.storage
            .write(LIBRARY_SNAPSHOT, data.into_bytes())
            .await?;
        Ok(())
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
