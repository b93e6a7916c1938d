//! Tag registry: many-to-many labels over catalog sections

use crate::catalog::CatalogStore;
use crate::error::{LibraryError, NotFound, Result};
use crate::types::{Section, SectionId, Tag, TagId, DEFAULT_TAG_COLOR};
use serde::{Deserialize, Serialize};

/// User tags in creation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    next_id: TagId,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            next_id: 1,
        }
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LibraryError::Validation(
            "tag name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn normalize_color(color: &str) -> String {
    let color = color.trim();
    if color.is_empty() {
        DEFAULT_TAG_COLOR.to_string()
    } else {
        color.to_string()
    }
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tag with a fresh id
    pub fn create_tag(&mut self, name: &str, color: &str) -> Result<&Tag> {
        let name = validate_name(name)?;
        let id = self.next_id;
        self.next_id += 1;
        self.tags.push(Tag::new(id, name, normalize_color(color)));
        tracing::debug!(tag_id = id, "created tag");
        Ok(&self.tags[self.tags.len() - 1])
    }

    /// Remove a tag with all its links
    ///
    /// Unknown ids are ignored; returns whether a tag was removed.
    pub fn delete_tag(&mut self, id: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        let removed = self.tags.len() != before;
        if removed {
            tracing::debug!(tag_id = id, "deleted tag");
        }
        removed
    }

    pub fn get_tag(&self, id: TagId) -> Result<&Tag> {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Tag(id)))
    }

    fn tag_mut(&mut self, id: TagId) -> Result<&mut Tag> {
        self.tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Tag(id)))
    }

    pub fn rename_tag(&mut self, id: TagId, name: &str) -> Result<&Tag> {
        let name = validate_name(name)?;
        let tag = self.tag_mut(id)?;
        tag.name = name;
        Ok(tag)
    }

    pub fn recolor_tag(&mut self, id: TagId, color: &str) -> Result<&Tag> {
        let tag = self.tag_mut(id)?;
        tag.color = normalize_color(color);
        Ok(tag)
    }

    /// Add a section to a tag; adding twice is a no-op
    pub fn add_section_to_tag(
        &mut self,
        catalog: &CatalogStore,
        id: TagId,
        section_id: SectionId,
    ) -> Result<bool> {
        if !catalog.contains_section(section_id) {
            return Err(NotFound::Section(section_id).into());
        }
        Ok(self.tag_mut(id)?.section_ids.insert(section_id))
    }

    /// Remove a section from a tag; removing a non-member is a no-op
    pub fn remove_section_from_tag(&mut self, id: TagId, section_id: SectionId) -> Result<bool> {
        Ok(self.tag_mut(id)?.section_ids.remove(&section_id))
    }

    /// All tags in creation order
    pub fn list_tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Member sections of a tag, skipping ids the catalog no longer has
    pub fn sections_for_tag<'a>(
        &self,
        catalog: &'a CatalogStore,
        id: TagId,
    ) -> Result<Vec<&'a Section>> {
        let tag = self.get_tag(id)?;
        Ok(tag
            .section_ids
            .iter()
            .filter_map(|sid| catalog.get_section(*sid).ok())
            .collect())
    }

    /// Tags that contain `section_id`
    pub fn tags_for_section(&self, section_id: SectionId) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.contains(section_id)).collect()
    }

    /// Drop memberships pointing at sections the catalog no longer has
    pub fn prune_dangling(&mut self, catalog: &CatalogStore) -> usize {
        let mut pruned = 0;
        for tag in &mut self.tags {
            let before = tag.section_ids.len();
            tag.section_ids.retain(|sid| catalog.contains_section(*sid));
            pruned += before - tag.section_ids.len();
        }
        if pruned > 0 {
            tracing::debug!(pruned, "pruned dangling tag memberships");
        }
        pruned
    }
}
