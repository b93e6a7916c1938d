//! User preferences store: reading settings and favorite/pin toggles

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::types::{
    round_tenth, BookId, ReadingPreference, SectionId, Step, TextAlign, Theme, FONT_SIZE_MAX,
    FONT_SIZE_MIN, LINE_HEIGHT_MAX, LINE_HEIGHT_MIN, LINE_HEIGHT_STEP,
};
use serde::{Deserialize, Serialize};

/// Process-wide reading settings
///
/// Adjustments clamp at their bounds instead of failing, so every setter is
/// total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferencesStore {
    reading: ReadingPreference,
    theme: Theme,
}

impl PreferencesStore {
    pub fn new(theme: Theme) -> Self {
        Self {
            reading: ReadingPreference::for_theme(theme),
            theme,
        }
    }

    pub fn reading_preference(&self) -> &ReadingPreference {
        &self.reading
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Move the font size one point; no-op at the bounds
    pub fn adjust_font_size(&mut self, step: Step) -> u8 {
        let size = &mut self.reading.font_size;
        *size = match step {
            Step::Increase => size.saturating_add(1),
            Step::Decrease => size.saturating_sub(1),
        }
        .clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        *size
    }

    /// Move the line-height multiplier by a tenth; no-op at the bounds
    pub fn adjust_line_height(&mut self, step: Step) -> f32 {
        let current = self.reading.line_height_multiplier;
        let next = match step {
            Step::Increase => current + LINE_HEIGHT_STEP,
            Step::Decrease => current - LINE_HEIGHT_STEP,
        };
        self.reading.line_height_multiplier =
            round_tenth(next).clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX);
        self.reading.line_height_multiplier
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.reading.text_align = align;
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) {
        self.reading.text_color = color.into();
    }

    /// Restore the defaults for the current theme
    pub fn reset_to_default(&mut self) -> &ReadingPreference {
        self.reading = ReadingPreference::for_theme(self.theme);
        &self.reading
    }

    /// Switch theme; a text color still on the old default follows the new one
    pub fn apply_theme(&mut self, theme: Theme) {
        if self.reading.text_color == self.theme.text_color() {
            self.reading.text_color = theme.text_color().to_string();
        }
        self.theme = theme;
    }

    /// Pull loaded settings back inside their bounds and onto `theme`
    pub(crate) fn normalize(&mut self, theme: Theme) {
        let reading = &mut self.reading;
        reading.font_size = reading.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        reading.line_height_multiplier =
            round_tenth(reading.line_height_multiplier).clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX);
        if self.theme != theme {
            self.apply_theme(theme);
        }
    }

    /// Flip a section's favorite flag and return the new value
    pub fn toggle_favorite(
        &self,
        catalog: &mut CatalogStore,
        section_id: SectionId,
    ) -> Result<bool> {
        let favorite = catalog.toggle_favorite(section_id)?;
        tracing::debug!(section_id, favorite, "toggled favorite");
        Ok(favorite)
    }

    /// Flip a book's pin and return the new value
    pub fn toggle_pin(&self, catalog: &mut CatalogStore, book_id: BookId) -> Result<bool> {
        let pinned = catalog.toggle_pin(book_id)?;
        tracing::debug!(book_id, pinned, "toggled pin");
        Ok(pinned)
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Book, Section};
    use proptest::prelude::*;

    #[test]
    fn test_font_size_floor() {
        let mut prefs = PreferencesStore::default();
        for _ in 0..10 {
            prefs.adjust_font_size(Step::Decrease);
        }
        assert_eq!(prefs.reading_preference().font_size, 12);
        assert!(!prefs.reading_preference().can_decrease_font_size());
    }

    #[test]
    fn test_line_height_steps_round_to_tenths() {
        let mut prefs = PreferencesStore::default();
        assert_eq!(prefs.adjust_line_height(Step::Increase), 1.6);
        for _ in 0..10 {
            prefs.adjust_line_height(Step::Increase);
        }
        assert_eq!(prefs.reading_preference().line_height_multiplier, 2.0);
        for _ in 0..20 {
            prefs.adjust_line_height(Step::Decrease);
        }
        assert_eq!(prefs.reading_preference().line_height_multiplier, 1.2);
    }

    #[test]
    fn test_reset_to_default() {
        let mut prefs = PreferencesStore::new(Theme::Dark);
        prefs.adjust_font_size(Step::Increase);
        prefs.adjust_line_height(Step::Decrease);
        prefs.set_text_align(TextAlign::Right);
        prefs.set_text_color("#5B4636");

        let reset = prefs.reset_to_default();
        assert_eq!(reset, &ReadingPreference::for_theme(Theme::Dark));
    }

    #[test]
    fn test_apply_theme_follows_default_color_only() {
        let mut prefs = PreferencesStore::new(Theme::Light);
        prefs.apply_theme(Theme::Dark);
        assert_eq!(prefs.reading_preference().text_color, "#FFFFFF");

        prefs.set_text_color("#1A73E8");
        prefs.apply_theme(Theme::Light);
        assert_eq!(prefs.reading_preference().text_color, "#1A73E8");
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_steps_from_out_of_range_size_land_in_bounds() {
        let mut prefs = PreferencesStore::default();
        prefs.reading.font_size = 40;
        assert_eq!(prefs.adjust_font_size(Step::Decrease), FONT_SIZE_MAX);

        prefs.reading.font_size = 5;
        assert_eq!(prefs.adjust_font_size(Step::Increase), FONT_SIZE_MIN);
    }

    #[test]
    fn test_normalize_clamps_and_follows_theme() {
        let mut prefs = PreferencesStore::new(Theme::Light);
        prefs.reading.font_size = 3;
        prefs.reading.line_height_multiplier = 7.25;

        prefs.normalize(Theme::Dark);
        assert_eq!(prefs.reading_preference().font_size, FONT_SIZE_MIN);
        assert_eq!(prefs.reading_preference().line_height_multiplier, LINE_HEIGHT_MAX);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.reading_preference().text_color, "#FFFFFF");
    }

    #[test]
    fn test_toggles_are_involutions() {
        let mut catalog = CatalogStore::from_records(
            vec![Book::new(1, "The Constitution of India")],
            vec![Section::new(101, 1, "Article 1", "India, that is Bharat").favorite()],
        )
        .unwrap();
        let prefs = PreferencesStore::default();

        assert!(!prefs.toggle_favorite(&mut catalog, 101).unwrap());
        assert!(prefs.toggle_favorite(&mut catalog, 101).unwrap());
        assert!(prefs.toggle_pin(&mut catalog, 1).unwrap());
        assert!(!prefs.toggle_pin(&mut catalog, 1).unwrap());
        assert!(prefs.toggle_pin(&mut catalog, 2).is_err());
    }

    proptest! {
        #[test]
        fn prop_font_size_stays_in_bounds(steps in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut prefs = PreferencesStore::default();
            for up in steps {
                let step = if up { Step::Increase } else { Step::Decrease };
                let size = prefs.adjust_font_size(step);
                prop_assert!((FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&size));
            }
        }

        #[test]
        fn prop_line_height_stays_in_bounds(steps in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut prefs = PreferencesStore::default();
            for up in steps {
                let step = if up { Step::Increase } else { Step::Decrease };
                let value = prefs.adjust_line_height(step);
                prop_assert!((LINE_HEIGHT_MIN..=LINE_HEIGHT_MAX).contains(&value));
                prop_assert_eq!(value, round_tenth(value));
            }
        }
    }
}
