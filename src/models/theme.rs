//! Theme configuration and style-token derivation.
//!
//! Themes are plain data. Rendering-facing styles are derived through a pure
//! function into [`StyleTokens`] that the presentation layer applies
//! declaratively; the core never touches a document or style element.

use serde::{Deserialize, Serialize};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light canvas and dark text.
    #[default]
    Light,
    /// Dark canvas and light text.
    Dark,
}

/// Resolved theme configuration stored with a published bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Display mode this configuration was derived from.
    pub mode: ThemeMode,
    /// Accent color for interactive elements.
    pub primary_color: String,
    /// Page background color.
    pub background: String,
    /// Default text color.
    pub text: String,
}

impl ThemeConfig {
    /// Built-in light preset.
    #[must_use]
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            primary_color: "#55883B".to_string(),
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
        }
    }

    /// Built-in dark preset.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            primary_color: "#55883B".to_string(),
            background: "#1a1a1a".to_string(),
            text: "#ffffff".to_string(),
        }
    }

    /// Returns the preset for a display mode.
    #[must_use]
    pub fn preset(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Derives the style tokens for this theme.
    ///
    /// Pure: the same configuration always yields the same tokens.
    #[must_use]
    pub fn style_tokens(&self) -> StyleTokens {
        match self.mode {
            ThemeMode::Light => StyleTokens {
                css_class: "theme-light",
                canvas_background: "#ffffff",
                field_background: "#f5f5f5",
                field_text: "#000000",
                field_border: "rgba(85, 136, 59, 0.2)",
            },
            ThemeMode::Dark => StyleTokens {
                css_class: "theme-dark",
                canvas_background: "#2a2a2a",
                field_background: "#1a1a1a",
                field_text: "#ffffff",
                field_border: "rgba(85, 136, 59, 0.3)",
            },
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::light()
    }
}

/// Declarative styling tokens for the canvas and its input widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleTokens {
    /// CSS class name the frontend attaches to the canvas frame.
    pub css_class: &'static str,
    /// Canvas frame background color.
    pub canvas_background: &'static str,
    /// Background color for inputs, textareas, and selects.
    pub field_background: &'static str,
    /// Text color for input widgets.
    pub field_text: &'static str,
    /// Border color for input widgets.
    pub field_border: &'static str,
}
