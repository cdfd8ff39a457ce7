//! Details page for one show

use eframe::egui::{self, RichText};

use crate::models::Show;
use crate::ui::components::{render_error, render_loading, render_section_frame};
use crate::ui::theme::Theme;
use crate::util::{format_rating, format_run, strip_html};
use crate::views::{DetailsState, DetailsView};

pub fn render_details_page(theme: &Theme, ui: &mut egui::Ui, view: &DetailsView) {
    match view.state() {
        DetailsState::Loading => render_loading(theme, ui, "Loading..."),
        DetailsState::Error(err) => {
            if render_error(theme, ui, &DetailsState::error_text(&err)) {
                view.retry();
            }
        }
        DetailsState::Ready(show) => {
            egui::ScrollArea::vertical()
                .id_salt("details")
                .auto_shrink([false, false])
                .show(ui, |ui| render_show(theme, ui, &show));
        }
    }
}

fn render_show(theme: &Theme, ui: &mut egui::Ui, show: &Show) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&show.name).size(28.0).strong().color(theme.text));
        let run = format_run(show);
        if !run.is_empty() {
            ui.label(RichText::new(run).size(16.0).color(theme.text_dim));
        }
    });
    ui.label(RichText::new(format_rating(show)).size(16.0).color(theme.rating));
    ui.add_space(12.0);

    render_section_frame(theme, ui, "DETAILS", |ui| {
        egui::Grid::new("show_facts")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                fact(theme, ui, "Genres", &show.genres.join(", "));
                if let Some(network) = show.broadcaster() {
                    fact(theme, ui, "Network", network);
                }
                if let Some(status) = &show.status {
                    fact(theme, ui, "Status", status);
                }
                if let Some(language) = &show.language {
                    fact(theme, ui, "Language", language);
                }
                if let Some(runtime) = show.runtime.or(show.average_runtime) {
                    fact(theme, ui, "Runtime", &format!("{} min", runtime));
                }
                if let Some(schedule) = show.schedule.as_ref().filter(|s| !s.days.is_empty()) {
                    let when = format!("{} {}", schedule.days.join(", "), schedule.time);
                    fact(theme, ui, "Airs", when.trim());
                }
                if let Some(premiered) = &show.premiered {
                    fact(theme, ui, "Premiered", premiered);
                }
            });
    });

    ui.add_space(12.0);
    render_section_frame(theme, ui, "SUMMARY", |ui| {
        let summary = show.summary.as_deref().map(strip_html).unwrap_or_default();
        if summary.is_empty() {
            ui.label(RichText::new("No summary available").color(theme.text_dim));
        } else {
            ui.label(RichText::new(summary).color(theme.text));
        }
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if !show.url.is_empty() && ui.button("Open on TVmaze").clicked() {
            if let Err(e) = open::that(&show.url) {
                tracing::warn!("Failed to open {}: {}", show.url, e);
            }
        }
        if let Some(site) = &show.official_site {
            ui.hyperlink_to("Official site", site);
        }
        if let Some(poster) = show.original_image() {
            ui.hyperlink_to("Poster", poster);
        }
    });
}

fn fact(theme: &Theme, ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).color(theme.text_dim));
    ui.label(RichText::new(value).color(theme.text));
    ui.end_row();
}
