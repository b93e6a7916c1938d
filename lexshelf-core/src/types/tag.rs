//! User-defined tags grouping sections across books

use super::SectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a tag
pub type TagId = u64;

/// Color given to tags created without one
pub const DEFAULT_TAG_COLOR: &str = "#4294ff";

/// A label with its section membership set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Hex color token, e.g. "#FF6B6B"
    pub color: String,
    /// Member sections, ordered by id
    #[serde(default)]
    pub section_ids: BTreeSet<SectionId>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            section_ids: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `section_id` is a member
    pub fn contains(&self, section_id: SectionId) -> bool {
        self.section_ids.contains(&section_id)
    }

    /// Number of member sections
    pub fn len(&self) -> usize {
        self.section_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section_ids.is_empty()
    }
}
