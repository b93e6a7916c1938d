//! Section records - addressable units of legal text within a book

use super::BookId;
use serde::{Deserialize, Serialize};

/// Identifier of a section in the catalog
pub type SectionId = u64;

/// A single article or section of a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Unique identifier for this section
    pub id: SectionId,

    /// Owning book
    pub book_id: BookId,

    /// Heading, e.g. "Article 1: Name and territory of the Union"
    pub title: String,

    /// One-line synopsis
    pub description: Option<String>,

    /// Full text
    pub content: String,

    /// Flagged by the user for quick recall
    #[serde(default)]
    pub is_favorite: bool,
}

impl Section {
    /// Create a new section belonging to `book_id`
    pub fn new(
        id: SectionId,
        book_id: BookId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            book_id,
            title: title.into(),
            description: None,
            content: content.into(),
            is_favorite: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as favorite
    pub fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }
}

/// A section as shown in favorites and tag listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionSummary {
    pub id: SectionId,
    pub title: String,
    pub book_title: String,
}
