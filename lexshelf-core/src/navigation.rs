//! Navigation intents emitted by the core
//!
//! The core never knows about routes or view hierarchies; it only says which
//! screen to show next. A shell implements [`Navigator`] to act on intents.

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::types::{BookId, SectionId};
use serde::{Deserialize, Serialize};

/// A destination in the reading app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "screen", content = "id", rename_all = "snake_case")]
pub enum Screen {
    Home,
    AllBooks,
    BookDetails(BookId),
    SectionDetails(SectionId),
    Tags,
    Favorites,
    Profile,
    Notifications,
    NotificationSettings,
    Login,
    About,
    Contact,
    PrivacyPolicy,
}

/// What the shell should do next
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavIntent {
    /// Push a screen
    GoTo { target: Screen },
    /// Swap the current screen without growing history
    Replace { target: Screen },
    /// Pop the current screen
    Back,
}

/// Consumer of navigation intents
pub trait Navigator {
    fn dispatch(&mut self, intent: NavIntent);
}

/// History stack navigator for headless shells and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryNavigator {
    stack: Vec<Screen>,
}

impl HistoryNavigator {
    pub fn new(root: Screen) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> Screen {
        // The root is never popped
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

impl Navigator for HistoryNavigator {
    fn dispatch(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::GoTo { target } => self.stack.push(target),
            NavIntent::Replace { target } => {
                let last = self.stack.len() - 1;
                self.stack[last] = target;
            }
            NavIntent::Back => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Intent to open a section
pub fn open_section(section_id: SectionId) -> NavIntent {
    NavIntent::GoTo {
        target: Screen::SectionDetails(section_id),
    }
}

/// Intent to advance from `section_id` to the next section of its book
///
/// `None` at the last section of a book.
pub fn next_section_intent(
    catalog: &CatalogStore,
    section_id: SectionId,
) -> Result<Option<NavIntent>> {
    Ok(catalog
        .next_section(section_id)?
        .map(|next| NavIntent::Replace {
            target: Screen::SectionDetails(next.id),
        }))
}
