//! Home page: five genre rows

use eframe::egui::{self, RichText};

use crate::ui::components::{render_error, render_loading, render_show_row};
use crate::ui::theme::Theme;
use crate::views::{HOME_ERROR_TEXT, HomeState, HomeView};

/// Render the home page. Returns the id of a clicked show.
pub fn render_home_page(theme: &Theme, ui: &mut egui::Ui, view: &HomeView) -> Option<u64> {
    match view.state() {
        HomeState::Loading => {
            render_loading(theme, ui, "Loading shows...");
            None
        }
        HomeState::Error(_) => {
            if render_error(theme, ui, HOME_ERROR_TEXT) {
                view.refresh();
            }
            None
        }
        HomeState::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("The catalog is empty").color(theme.text_dim));
                if ui.button("Refresh").clicked() {
                    view.refresh();
                }
            });
            None
        }
        HomeState::Ready(rows) => {
            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("home_rows")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for row in &rows {
                        if let Some(id) = render_show_row(theme, ui, row.genre.title(), &row.shows) {
                            clicked = Some(id);
                        }
                        ui.add_space(18.0);
                    }
                });
            clicked
        }
    }
}
