//! Local notification feed

use crate::error::{LibraryError, NotFound, Result};
use crate::types::{Notification, NotificationId, NotificationKind, NotificationSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only feed with read flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationFeed {
    entries: Vec<Notification>,
    next_id: NotificationId,
    #[serde(default)]
    settings: NotificationSettings,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            settings: NotificationSettings::default(),
        }
    }
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut NotificationSettings {
        &mut self.settings
    }

    /// Record a notification stamped now
    ///
    /// Returns `None` when the settings mute this kind.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Option<&Notification> {
        self.push_at(kind, title, message, Utc::now())
    }

    /// Record a notification with an explicit timestamp
    pub fn push_at(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Option<&Notification> {
        if !self.settings.allows(kind) {
            tracing::debug!(?kind, "notification muted by settings");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
        });
        self.entries.last()
    }

    /// Most recent first
    pub fn list(&self) -> Vec<&Notification> {
        let mut entries: Vec<&Notification> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries
    }

    pub fn mark_read(&mut self, id: NotificationId) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Notification(id)))?;
        entry.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
