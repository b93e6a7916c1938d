//! The process-wide library: every store plus configuration
//!
//! A [`Library`] is built once at startup, mutated only through the store
//! contracts, and saved as a JSON snapshot.

use crate::catalog::CatalogStore;
use crate::error::{LibraryError, Result, StorageError};
use crate::notifications::NotificationFeed;
use crate::preferences::PreferencesStore;
use crate::remote::{CatalogDocument, RemoteCatalog};
use crate::storage::StorageProvider;
use crate::tags::TagRegistry;
use crate::types::{
    Book, BookFilter, BookId, BookSort, NotificationKind, Section, SectionId, Tag, TagId, Theme,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Library-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Color scheme
    pub theme: Theme,

    /// How many books the home screen lists as recent
    pub recent_limit: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            recent_limit: 5,
        }
    }
}

/// Home screen shelves
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeView {
    pub pinned: Vec<Book>,
    pub recent: Vec<Book>,
    pub new_arrivals: Vec<Book>,
}

/// Outcome of a successful catalog refresh
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RefreshSummary {
    pub books: usize,
    pub sections: usize,
    pub pruned_tag_links: usize,
}

/// All user-facing state of the reading app
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Library {
    config: LibraryConfig,
    catalog: CatalogStore,
    preferences: PreferencesStore,
    tags: TagRegistry,
    notifications: NotificationFeed,
}

/// Fetch a complete catalog from a remote source
///
/// Either every fetch succeeds or the first failure is returned.
pub async fn fetch_catalog(remote: &dyn RemoteCatalog) -> Result<CatalogDocument> {
    let mut books = remote.fetch_books().await?;
    let mut seen = HashSet::new();
    books.retain(|b| seen.insert(b.id));
    let mut sections = Vec::new();
    for book in &books {
        let fetched = remote.fetch_sections(book.id).await?;
        sections.extend(fetched.into_iter().filter(|s| s.book_id == book.id));
    }
    Ok(CatalogDocument { books, sections })
}

impl Library {
    /// Empty library
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            preferences: PreferencesStore::new(config.theme),
            config,
            catalog: CatalogStore::new(),
            tags: TagRegistry::new(),
            notifications: NotificationFeed::new(),
        }
    }

    /// Library over an existing catalog
    pub fn with_catalog(config: LibraryConfig, catalog: CatalogStore) -> Self {
        Self {
            catalog,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferencesStore {
        &mut self.preferences
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationFeed {
        &mut self.notifications
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Switch color scheme
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        self.preferences.apply_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.config.theme.toggled());
        self.config.theme
    }

    /// Pinned, recent and new books for the home screen
    pub fn home(&self) -> HomeView {
        fn owned(books: Vec<&Book>) -> Vec<Book> {
            books.into_iter().cloned().collect()
        }
        HomeView {
            pinned: owned(self.catalog.list_books(BookFilter::Pinned, BookSort::Title)),
            recent: owned(self.catalog.recent_books(self.config.recent_limit)),
            new_arrivals: owned(self.catalog.list_books(BookFilter::New, BookSort::Title)),
        }
    }

    /// Flip a section's favorite flag, noting additions in the feed
    pub fn toggle_favorite(&mut self, section_id: SectionId) -> Result<bool> {
        let favorite = self
            .preferences
            .toggle_favorite(&mut self.catalog, section_id)?;
        if favorite {
            let title = self.catalog.get_section(section_id)?.title.clone();
            self.notifications.push(
                NotificationKind::Favorite,
                "Section Added to Favorites",
                format!("{} has been added to your favorites", title),
            );
        }
        Ok(favorite)
    }

    /// Flip a book's pin
    pub fn toggle_pin(&mut self, book_id: BookId) -> Result<bool> {
        self.preferences.toggle_pin(&mut self.catalog, book_id)
    }

    /// Create a tag, noting it in the feed
    pub fn create_tag(&mut self, name: &str, color: &str) -> Result<Tag> {
        let tag = self.tags.create_tag(name, color)?.clone();
        self.notifications.push(
            NotificationKind::Tag,
            "New Tag Created",
            format!("You created a new tag: \"{}\"", tag.name),
        );
        Ok(tag)
    }

    pub fn rename_tag(&mut self, id: TagId, name: &str) -> Result<Tag> {
        Ok(self.tags.rename_tag(id, name)?.clone())
    }

    pub fn recolor_tag(&mut self, id: TagId, color: &str) -> Result<Tag> {
        Ok(self.tags.recolor_tag(id, color)?.clone())
    }

    pub fn delete_tag(&mut self, id: TagId) -> bool {
        self.tags.delete_tag(id)
    }

    pub fn add_section_to_tag(&mut self, id: TagId, section_id: SectionId) -> Result<bool> {
        self.tags.add_section_to_tag(&self.catalog, id, section_id)
    }

    pub fn remove_section_from_tag(&mut self, id: TagId, section_id: SectionId) -> Result<bool> {
        self.tags.remove_section_from_tag(id, section_id)
    }

    pub fn sections_for_tag(&self, id: TagId) -> Result<Vec<&Section>> {
        self.tags.sections_for_tag(&self.catalog, id)
    }

    /// Replace the catalog with a fetched document
    pub fn apply_remote(&mut self, document: CatalogDocument) -> RefreshSummary {
        self.catalog.merge_remote(document.books, document.sections);
        let pruned_tag_links = self.tags.prune_dangling(&self.catalog);
        let summary = RefreshSummary {
            books: self.catalog.books().len(),
            sections: self.catalog.sections().len(),
            pruned_tag_links,
        };
        tracing::info!(
            books = summary.books,
            sections = summary.sections,
            "catalog refreshed"
        );
        summary
    }

    /// Fetch from `remote` and replace the catalog
    ///
    /// On failure the current catalog is kept and the error returned.
    pub async fn refresh(&mut self, remote: &dyn RemoteCatalog) -> Result<RefreshSummary> {
        match fetch_catalog(remote).await {
            Ok(document) => Ok(self.apply_remote(document)),
            Err(e) => {
                tracing::warn!("catalog refresh failed, keeping last snapshot: {}", e);
                Err(e)
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(data)?;
        Ok(library.normalized())
    }

    /// Restore the invariants a deserialized snapshot may break
    fn normalized(mut self) -> Self {
        self.catalog.normalize();
        let pruned = self.tags.prune_dangling(&self.catalog);
        if pruned > 0 {
            tracing::warn!(pruned, "snapshot had tag links to missing sections");
        }
        self.preferences.normalize(self.config.theme);
        self
    }

    /// Save a snapshot to storage
    pub async fn save(&self, storage: &dyn StorageProvider, path: &str) -> Result<()> {
        let data = self.to_json()?;
        storage.write(path, data.into_bytes()).await?;
        Ok(())
    }

    /// Load a snapshot from storage; `None` when nothing was saved yet
    pub async fn load(storage: &dyn StorageProvider, path: &str) -> Result<Option<Self>> {
        match storage.read(path).await {
            Ok(data) => {
                let library: Self = serde_json::from_slice(&data)?;
                Ok(Some(library.normalized()))
            }
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(LibraryError::Storage(e)),
        }
    }
}
