use std::str::FromStr;

use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Midnight,
    Crimson,
    Ocean,
}

#[derive(Debug, Error)]
#[error("Unknown theme: {0} (expected midnight, crimson or ocean)")]
pub struct UnknownTheme(String);

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Midnight, ThemePreset::Crimson, ThemePreset::Ocean]
    }

    /// Key used in the config file
    pub fn key(&self) -> &'static str {
        match self {
            ThemePreset::Midnight => "midnight",
            ThemePreset::Crimson => "crimson",
            ThemePreset::Ocean => "ocean",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Midnight => "Midnight",
            ThemePreset::Crimson => "Crimson",
            ThemePreset::Ocean => "Ocean",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Midnight => Theme::midnight(),
            ThemePreset::Crimson => Theme::crimson(),
            ThemePreset::Ocean => Theme::ocean(),
        }
    }
}

impl FromStr for ThemePreset {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreset::all()
            .iter()
            .copied()
            .find(|preset| preset.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Colors used across the window
#[derive(Debug, Clone)]
pub struct Theme {
    pub backdrop: Color32,
    pub surface: Color32,
    pub card: Color32,
    pub card_hover: Color32,

    pub text: Color32,
    pub text_dim: Color32,

    pub accent: Color32,
    pub accent_strong: Color32,
    pub rating: Color32,
    pub error: Color32,

    pub border: Color32,
}

impl Theme {
    /// Near-black with a red accent, the streaming-service look
    pub fn midnight() -> Self {
        Self {
            backdrop: Color32::from_rgb(10, 10, 12),
            surface: Color32::from_rgb(20, 20, 22),
            card: Color32::from_rgb(34, 34, 38),
            card_hover: Color32::from_rgb(52, 52, 58),

            text: Color32::from_rgb(245, 245, 245),
            text_dim: Color32::from_rgb(150, 150, 155),

            accent: Color32::from_rgb(229, 9, 20),
            accent_strong: Color32::from_rgb(255, 59, 48),
            rating: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(60, 60, 66),
        }
    }

    /// Warm dark reds
    pub fn crimson() -> Self {
        Self {
            backdrop: Color32::from_rgb(20, 8, 10),
            surface: Color32::from_rgb(32, 14, 17),
            card: Color32::from_rgb(50, 22, 27),
            card_hover: Color32::from_rgb(72, 32, 38),

            text: Color32::from_rgb(252, 236, 238),
            text_dim: Color32::from_rgb(190, 150, 156),

            accent: Color32::from_rgb(244, 63, 94),
            accent_strong: Color32::from_rgb(251, 113, 133),
            rating: Color32::from_rgb(253, 186, 116),
            error: Color32::from_rgb(252, 165, 165),

            border: Color32::from_rgb(90, 40, 48),
        }
    }

    /// Deep blues with a teal accent
    pub fn ocean() -> Self {
        Self {
            backdrop: Color32::from_rgb(7, 14, 24),
            surface: Color32::from_rgb(12, 24, 40),
            card: Color32::from_rgb(20, 38, 62),
            card_hover: Color32::from_rgb(30, 54, 86),

            text: Color32::from_rgb(236, 244, 252),
            text_dim: Color32::from_rgb(140, 165, 190),

            accent: Color32::from_rgb(20, 184, 166),
            accent_strong: Color32::from_rgb(45, 212, 191),
            rating: Color32::from_rgb(251, 191, 36),
            error: Color32::from_rgb(251, 113, 133),

            border: Color32::from_rgb(40, 64, 92),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.surface;
        visuals.panel_fill = self.backdrop;
        visuals.faint_bg_color = self.surface;
        visuals.extreme_bg_color = self.card;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.surface;
        widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_dim);

        widgets.inactive.bg_fill = self.card;
        widgets.inactive.weak_bg_fill = self.card;
        widgets.inactive.fg_stroke = Stroke::new(1.0, self.text);

        widgets.hovered.bg_fill = self.card_hover;
        widgets.hovered.weak_bg_fill = self.card_hover;
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        widgets.hovered.fg_stroke = Stroke::new(1.0, self.text);

        widgets.active.bg_fill = self.accent;
        widgets.active.weak_bg_fill = self.accent;
        widgets.active.fg_stroke = Stroke::new(1.0, self.text);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.selection.stroke = Stroke::new(1.0, self.accent_strong);
        visuals.hyperlink_color = self.accent_strong;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_keys_parse_back() {
        for preset in ThemePreset::all() {
            assert_eq!(preset.key().parse::<ThemePreset>().unwrap(), *preset);
        }
        assert_eq!("OCEAN".parse::<ThemePreset>().unwrap(), ThemePreset::Ocean);
        assert!("amber".parse::<ThemePreset>().is_err());
    }
}
