//! Local notification records and their on/off switches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a notification
pub type NotificationId = u64;

/// What a notification is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A book's text was amended
    Update,
    /// A section was added to favorites
    Favorite,
    /// A tag was created or changed
    Tag,
}

/// A single entry in the notification feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Per-category notification switches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    pub updates: bool,
    pub new_books: bool,
    pub favorites: bool,
    pub tags: bool,
    pub reminders: bool,
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            updates: true,
            new_books: true,
            favorites: true,
            tags: true,
            reminders: false,
            marketing: false,
        }
    }
}

/// Name of a single switch in [`NotificationSettings`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    Updates,
    NewBooks,
    Favorites,
    Tags,
    Reminders,
    Marketing,
}

impl std::str::FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updates" => Ok(Self::Updates),
            "new_books" | "newBooks" => Ok(Self::NewBooks),
            "favorites" => Ok(Self::Favorites),
            "tags" => Ok(Self::Tags),
            "reminders" => Ok(Self::Reminders),
            "marketing" => Ok(Self::Marketing),
            other => Err(format!("unknown notification setting '{}'", other)),
        }
    }
}

impl NotificationSettings {
    fn slot(&mut self, key: SettingKey) -> &mut bool {
        match key {
            SettingKey::Updates => &mut self.updates,
            SettingKey::NewBooks => &mut self.new_books,
            SettingKey::Favorites => &mut self.favorites,
            SettingKey::Tags => &mut self.tags,
            SettingKey::Reminders => &mut self.reminders,
            SettingKey::Marketing => &mut self.marketing,
        }
    }

    /// Flip a switch and return its new value
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let slot = self.slot(key);
        *slot = !*slot;
        *slot
    }

    /// Whether notifications of `kind` are recorded
    pub fn allows(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Update => self.updates,
            NotificationKind::Favorite => self.favorites,
            NotificationKind::Tag => self.tags,
        }
    }
}
