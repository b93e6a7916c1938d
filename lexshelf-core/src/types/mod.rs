//! Core record types for the Lexshelf library

mod book;
mod notification;
mod preference;
mod section;
mod tag;
mod theme;
mod user;

pub use book::{Book, BookFilter, BookId, BookSort};
pub use notification::{
    Notification, NotificationId, NotificationKind, NotificationSettings, SettingKey,
};
pub(crate) use preference::round_tenth;
pub use preference::{
    ReadingPreference, Step, TextAlign, FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN,
    LINE_HEIGHT_DEFAULT, LINE_HEIGHT_MAX, LINE_HEIGHT_MIN, LINE_HEIGHT_STEP,
};
pub use section::{Section, SectionId, SectionSummary};
pub use tag::{Tag, TagId, DEFAULT_TAG_COLOR};
pub use theme::{text_color_presets, ColorPreset, Palette, Theme};
pub use user::{ProfileUpdate, User};
