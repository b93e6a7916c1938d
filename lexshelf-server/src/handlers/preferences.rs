//! Reading preference and theme handlers

use super::{persist, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{extract::State, Json};
use lexshelf_core::types::{text_color_presets, ColorPreset, Palette};
use lexshelf_core::{ReadingPreference, Step, TextAlign, Theme};
use serde::{Deserialize, Serialize};

/// Reading settings plus what the reader needs to render them
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    #[serde(flatten)]
    pub reading: ReadingPreference,
    /// Font size times line-height multiplier
    pub effective_line_height: f32,
    pub can_increase_font_size: bool,
    pub can_decrease_font_size: bool,
    pub can_increase_line_height: bool,
    pub can_decrease_line_height: bool,
    pub color_presets: [ColorPreset; 5],
}

impl PreferencesResponse {
    fn new(reading: &ReadingPreference, theme: Theme) -> Self {
        Self {
            effective_line_height: reading.effective_line_height(),
            can_increase_font_size: reading.can_increase_font_size(),
            can_decrease_font_size: reading.can_decrease_font_size(),
            can_increase_line_height: reading.can_increase_line_height(),
            can_decrease_line_height: reading.can_decrease_line_height(),
            color_presets: text_color_presets(theme),
            reading: reading.clone(),
        }
    }
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<PreferencesResponse> {
    let library = state.library.read().await;
    Json(PreferencesResponse::new(
        library.preferences().reading_preference(),
        library.theme(),
    ))
}

/// A single preference change
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PreferenceCommand {
    FontSize { step: Step },
    LineHeight { step: Step },
    Align { align: TextAlign },
    Color { color: String },
    Reset,
}

/// Apply a preference command; adjustments clamp at their bounds
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(command): Json<PreferenceCommand>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let response = {
        let mut library = state.library.write().await;
        let preferences = library.preferences_mut();
        match command {
            PreferenceCommand::FontSize { step } => {
                preferences.adjust_font_size(step);
            }
            PreferenceCommand::LineHeight { step } => {
                preferences.adjust_line_height(step);
            }
            PreferenceCommand::Align { align } => preferences.set_text_align(align),
            PreferenceCommand::Color { color } => preferences.set_text_color(color),
            PreferenceCommand::Reset => {
                preferences.reset_to_default();
            }
        }
        PreferencesResponse::new(library.preferences().reading_preference(), library.theme())
    };
    persist(&state).await?;
    state.broadcast(ServerEvent::PreferencesChanged);
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub palette: Palette,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            palette: *theme.palette(),
        }
    }
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(state.library.read().await.theme().into())
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    /// Omitted to flip the current theme
    pub theme: Option<Theme>,
}

/// Set or toggle the color scheme
pub async fn set_theme(
    State(state): State<AppState>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let theme = {
        let mut library = state.library.write().await;
        match request.theme {
            Some(theme) => {
                library.set_theme(theme);
                theme
            }
            None => library.toggle_theme(),
        }
    };
    persist(&state).await?;
    state.broadcast(ServerEvent::PreferencesChanged);
    Ok(Json(theme.into()))
}
