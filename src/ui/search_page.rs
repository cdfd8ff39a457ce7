//! Search page: query box and result list

use eframe::egui::{self, RichText};

use crate::ui::components::{render_error, render_loading, show_card};
use crate::ui::theme::Theme;
use crate::views::{SearchState, SearchView};

/// Render the search page. Returns the id of a clicked result.
pub fn render_search_page(theme: &Theme, ui: &mut egui::Ui, view: &mut SearchView) -> Option<u64> {
    let mut input = view.query().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut input)
            .hint_text("Type to search...")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        view.set_input(input);
    }
    ui.add_space(12.0);

    match view.state() {
        SearchState::Idle => None,
        SearchState::Loading => {
            render_loading(theme, ui, "Searching...");
            None
        }
        SearchState::Error(err) => {
            if render_error(theme, ui, err.message()) {
                let query = view.query().to_string();
                view.set_input(query);
            }
            None
        }
        SearchState::NoResults { query } => {
            ui.label(RichText::new(SearchState::no_results_text(&query)).color(theme.text_dim));
            None
        }
        SearchState::Results(results) => {
            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("search_results")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for hit in results.iter() {
                            if show_card(theme, ui, &hit.show) {
                                clicked = Some(hit.show.id);
                            }
                        }
                    });
                });
            clicked
        }
    }
}
