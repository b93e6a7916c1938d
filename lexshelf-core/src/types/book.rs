//! Book records - the top-level legal texts of the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a book in the catalog
pub type BookId = u64;

/// A statute or code, composed of ordered sections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier for this book
    pub id: BookId,

    /// Display title, e.g. "Indian Penal Code, 1860"
    pub title: String,

    /// Number of sections in the published text
    ///
    /// This is the statute's own count and may exceed the sections
    /// actually loaded into the catalog.
    pub section_count: u32,

    /// Flagged by the user for prioritized display
    #[serde(default)]
    pub is_pinned: bool,

    /// Recently added to the library
    #[serde(default)]
    pub is_new: bool,

    /// Reading progress in percent (0..=100)
    #[serde(default)]
    pub progress: u8,

    /// Last time the user opened this book
    pub last_accessed: DateTime<Utc>,

    /// Last time the text itself was amended
    pub last_updated: DateTime<Utc>,
}

impl Book {
    /// Create a new book with the given id and title
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            section_count: 0,
            is_pinned: false,
            is_new: false,
            progress: 0,
            last_accessed: now,
            last_updated: now,
        }
    }

    /// Set the published section count
    pub fn with_section_count(mut self, count: u32) -> Self {
        self.section_count = count;
        self
    }

    /// Mark the book as pinned
    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }

    /// Mark the book as newly added
    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Set both timestamps
    pub fn with_timestamps(
        mut self,
        last_accessed: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        self.last_accessed = last_accessed;
        self.last_updated = last_updated;
        self
    }

    /// Set reading progress, clamped to 100
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }
}

/// Which books a listing includes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookFilter {
    #[default]
    All,
    Pinned,
    New,
}

impl BookFilter {
    /// Whether a book passes this filter
    pub fn matches(self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::Pinned => book.is_pinned,
            Self::New => book.is_new,
        }
    }
}

impl std::str::FromStr for BookFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pinned" => Ok(Self::Pinned),
            "new" => Ok(Self::New),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

/// How a book listing is ordered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookSort {
    /// Case-insensitive title order
    #[default]
    Title,
    /// Most recently opened first
    RecentlyAccessed,
    /// Largest statutes first
    SectionCount,
}

impl std::str::FromStr for BookSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "title" => Ok(Self::Title),
            "recent" | "recently_accessed" => Ok(Self::RecentlyAccessed),
            "sections" | "section_count" => Ok(Self::SectionCount),
            other => Err(format!("unknown sort '{}'", other)),
        }
    }
}
