use std::time::Duration;

use eframe::egui::{self, RichText};

use crate::config::Config;
use crate::context::AppContext;
use crate::router::Route;
use crate::state::{Tab, UiState};
use crate::ui::theme::ThemePreset;
use crate::ui::{
    render_about_dialog, render_details_page, render_home_page, render_search_page, render_tab,
};
use crate::views::{DetailsView, HomeView, SearchView};

/// How often to redraw while a request or debounce timer is pending
const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// The mounted page
pub enum Page {
    Home(HomeView),
    Details(DetailsView),
    Search(SearchView),
}

impl Page {
    /// Mount the page for `route`
    pub fn mount(ctx: &AppContext, route: &Route) -> Self {
        tracing::debug!("Mounting page for {}", route);
        match route {
            Route::Home => Page::Home(HomeView::mount(ctx)),
            Route::Details { id } => Page::Details(DetailsView::open(ctx, *id)),
            Route::Search { query } => Page::Search(SearchView::mount(ctx, query.as_deref())),
        }
    }

    /// Whether this page already shows `route`. Any search route matches a
    /// mounted search page, since typing rewrites the route in place.
    pub fn shows(&self, route: &Route) -> bool {
        match (self, route) {
            (Page::Home(_), Route::Home) => true,
            (Page::Details(view), Route::Details { id }) => view.id() == *id,
            (Page::Search(view), Route::Search { .. }) => {
                view.query() == route.query().unwrap_or_default()
            }
            _ => false,
        }
    }

    /// Whether something is still in flight for this page
    pub fn is_busy(&self) -> bool {
        match self {
            Page::Home(view) => view.catalog().is_loading(),
            Page::Details(DetailsView::Remote { show, .. }) => show.is_loading(),
            Page::Details(DetailsView::Cached(_)) => false,
            Page::Search(view) => view.is_debouncing() || view.results().is_loading(),
        }
    }
}

/// Main application state
pub struct ErtflixApp {
    /// Shared handles for every page
    pub(crate) ctx: AppContext,
    /// Application configuration
    pub(crate) config: Config,
    /// Window-level UI state
    pub(crate) ui: UiState,
    /// Page matching the navigator's current route
    page: Page,
}

impl ErtflixApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, ctx: AppContext) -> Self {
        let ui = UiState::new(config.appearance.theme);
        let page = Page::mount(&ctx, &ctx.current_route());

        Self {
            ctx,
            config,
            ui,
            page,
        }
    }

    /// Switch themes and remember the choice
    pub fn select_theme(&mut self, preset: ThemePreset) {
        self.ui.set_theme(preset);
        self.config.appearance.theme = preset;
        match self.config.save() {
            Ok(()) => tracing::info!("Theme set to {}", preset.key()),
            Err(e) => tracing::error!("Failed to save config: {}", e),
        }
    }

    /// Remount the page if the route moved under it
    fn sync_page(&mut self) {
        let route = self.ctx.current_route();
        let stale = match (&self.page, &route) {
            // Typing in the box rewrites the route, not the page
            (Page::Search(_), Route::Search { .. }) => false,
            (page, route) => !page.shows(route),
        };
        if stale {
            self.page = Page::mount(&self.ctx, &route);
        }
    }

    fn open_show(&self, id: u64) {
        self.ctx.navigator().push(Route::Details { id });
    }
}

impl eframe::App for ErtflixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        self.sync_page();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let theme = self.ui.current_theme.clone();
                ui.label(
                    RichText::new("ERTFLIX")
                        .size(20.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.add_space(16.0);

                let can_go_back = self.ctx.navigator().can_go_back();
                if ui.add_enabled(can_go_back, egui::Button::new("Back")).clicked() {
                    self.ctx.navigator().back();
                }

                render_tab(self, ui, Tab::Home, "Home");
                render_tab(self, ui, Tab::Search, "Search");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                    if let Page::Home(view) = &self.page {
                        if ui.button("Refresh").clicked() {
                            view.refresh();
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });

        // Route changes from the top bar take effect before the body draws
        self.sync_page();

        let theme = self.ui.current_theme.clone();
        let clicked = egui::CentralPanel::default()
            .show(ctx, |ui| match &mut self.page {
                Page::Home(view) => render_home_page(&theme, ui, view),
                Page::Details(view) => {
                    render_details_page(&theme, ui, view);
                    None
                }
                Page::Search(view) => render_search_page(&theme, ui, view),
            })
            .inner;

        if let Some(id) = clicked {
            self.open_show(id);
        }

        render_about_dialog(self, ctx);

        if self.page.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
