//! Light/dark theme and its color lookup table

use serde::{Deserialize, Serialize};

/// Application color scheme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors used by every screen for a given theme
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    card: "#FFFFFF",
    text: "#1A1A1A",
    text_secondary: "#757575",
    border: "#E5E5E5",
};

const DARK: Palette = Palette {
    background: "#000000",
    card: "#1A1A1A",
    text: "#FFFFFF",
    text_secondary: "#A0A0A0",
    border: "#2C2C2C",
};

impl Theme {
    /// Color table for this theme
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    /// Default reading text color
    pub fn text_color(self) -> &'static str {
        self.palette().text
    }

    /// The opposite theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// A named reading color offered next to the theme default
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ColorPreset {
    pub label: &'static str,
    pub value: &'static str,
}

/// Reading color choices; the first entry follows the theme
pub fn text_color_presets(theme: Theme) -> [ColorPreset; 5] {
    [
        ColorPreset {
            label: "Default",
            value: theme.text_color(),
        },
        ColorPreset {
            label: "Dark",
            value: "#333333",
        },
        ColorPreset {
            label: "Black",
            value: "#000000",
        },
        ColorPreset {
            label: "Blue",
            value: "#1A73E8",
        },
        ColorPreset {
            label: "Sepia",
            value: "#5B4636",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(Theme::Light.text_color(), "#1A1A1A");
        assert_eq!(Theme::Dark.palette().card, "#1A1A1A");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_default_preset_follows_theme() {
        assert_eq!(text_color_presets(Theme::Dark)[0].value, "#FFFFFF");
        assert_eq!(text_color_presets(Theme::Light)[4].label, "Sepia");
    }
}
