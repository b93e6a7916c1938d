//! Lexshelf Core Library
//!
//! Domain model for a legal-text reading library: a catalog of books and
//! their ordered sections, reading preferences, user tags and a local
//! notification feed. Identity, remote catalog sources and navigation are
//! external collaborators reached through traits.

pub mod catalog;
pub mod error;
pub mod format;
pub mod identity;
pub mod library;
pub mod navigation;
pub mod notifications;
pub mod preferences;
pub mod remote;
pub mod seed;
pub mod storage;
pub mod tags;
pub mod types;

pub use catalog::CatalogStore;
pub use error::{AuthError, FetchError, LibraryError, NotFound, RemoteError, Result};
pub use library::{HomeView, Library, LibraryConfig, RefreshSummary};
pub use notifications::NotificationFeed;
pub use preferences::PreferencesStore;
pub use tags::TagRegistry;
pub use types::{
    Book, BookFilter, BookId, BookSort, Notification, NotificationKind, ReadingPreference,
    Section, SectionId, SectionSummary, Step, Tag, TagId, TextAlign, Theme, User,
};
