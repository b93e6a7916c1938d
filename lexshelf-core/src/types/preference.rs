//! Reading preference value type

use super::Theme;
use serde::{Deserialize, Serialize};

/// Smallest selectable font size in points
pub const FONT_SIZE_MIN: u8 = 12;
/// Largest selectable font size in points
pub const FONT_SIZE_MAX: u8 = 24;
pub const FONT_SIZE_DEFAULT: u8 = 16;

pub const LINE_HEIGHT_MIN: f32 = 1.2;
pub const LINE_HEIGHT_MAX: f32 = 2.0;
pub const LINE_HEIGHT_DEFAULT: f32 = 1.5;
/// Increment applied per line-height step
pub const LINE_HEIGHT_STEP: f32 = 0.1;

/// Horizontal alignment of section text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl std::str::FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown alignment '{}'", other)),
        }
    }
}

/// Direction of a single font-size or line-height adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Increase,
    Decrease,
}

/// How section text is laid out while reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingPreference {
    pub font_size: u8,
    pub line_height_multiplier: f32,
    pub text_align: TextAlign,
    pub text_color: String,
}

impl ReadingPreference {
    /// Defaults for the given theme
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            font_size: FONT_SIZE_DEFAULT,
            line_height_multiplier: LINE_HEIGHT_DEFAULT,
            text_align: TextAlign::Left,
            text_color: theme.text_color().to_string(),
        }
    }

    /// Line spacing in points, as the renderer consumes it
    pub fn effective_line_height(&self) -> f32 {
        f32::from(self.font_size) * self.line_height_multiplier
    }

    pub fn can_increase_font_size(&self) -> bool {
        self.font_size < FONT_SIZE_MAX
    }

    pub fn can_decrease_font_size(&self) -> bool {
        self.font_size > FONT_SIZE_MIN
    }

    pub fn can_increase_line_height(&self) -> bool {
        self.line_height_multiplier < LINE_HEIGHT_MAX
    }

    pub fn can_decrease_line_height(&self) -> bool {
        self.line_height_multiplier > LINE_HEIGHT_MIN
    }
}

impl Default for ReadingPreference {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

/// Round to one decimal place
pub(crate) fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
