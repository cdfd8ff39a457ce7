//! UI-related application state

use crate::router::Route;
use crate::ui::theme::{Theme, ThemePreset};

/// Top bar tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Genre rows
    #[default]
    Home,
    /// Search box and results
    Search,
}

impl Tab {
    /// Tab highlighted for a route; details pages keep the Home tab lit
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Search { .. } => Tab::Search,
            Route::Home | Route::Details { .. } => Tab::Home,
        }
    }

    /// Where clicking the tab navigates
    pub fn route(&self) -> Route {
        match self {
            Tab::Home => Route::Home,
            Tab::Search => Route::search(""),
        }
    }
}

/// UI-related state
pub struct UiState {
    /// Selected preset
    pub theme_preset: ThemePreset,
    /// Colors of the selected preset
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    pub fn new(preset: ThemePreset) -> Self {
        Self {
            theme_preset: preset,
            current_theme: preset.theme(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
        }
    }

    /// Switch presets; the new colors are applied on the next frame
    pub fn set_theme(&mut self, preset: ThemePreset) {
        self.theme_preset = preset;
        self.current_theme = preset.theme();
        self.theme_dirty = true;
    }
}
