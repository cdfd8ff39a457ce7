//! Shared UI components

use std::sync::Arc;

use eframe::egui::{self, Color32, CornerRadius, CursorIcon, RichText, Sense, Stroke, Vec2};

use crate::app::ErtflixApp;
use crate::models::Show;
use crate::state::Tab;
use crate::ui::theme::{Theme, ThemePreset};
use crate::util::format_rating;

const CARD_WIDTH: f32 = 170.0;

/// Render a tab button, navigating on click
pub fn render_tab(app: &mut ErtflixApp, ui: &mut egui::Ui, tab: Tab, label: &str) {
    let theme = &app.ui.current_theme;
    let is_active = Tab::for_route(&app.ctx.current_route()) == tab;

    let (bg, text_color) = if is_active {
        (theme.surface, theme.accent_strong)
    } else {
        (Color32::TRANSPARENT, theme.text_dim)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color).strong())
        .fill(bg)
        .corner_radius(CornerRadius {
            nw: 6,
            ne: 6,
            sw: 0,
            se: 0,
        })
        .min_size(Vec2::new(80.0, 32.0));

    if ui.add(button).clicked() && !is_active {
        app.ctx.navigator().push(tab.route());
    }
}

/// Framed block with an accent title
pub fn render_section_frame<R>(
    theme: &Theme,
    ui: &mut egui::Ui,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.surface)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
        .stroke(Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(ui)
        })
        .inner
}

/// A clickable show card. Returns true when clicked.
pub fn show_card(theme: &Theme, ui: &mut egui::Ui, show: &Show) -> bool {
    let response = egui::Frame::new()
        .fill(theme.card)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
        .stroke(Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.add(
                egui::Label::new(RichText::new(&show.name).color(theme.text).strong())
                    .truncate(),
            );
            ui.label(
                RichText::new(show.primary_genre().unwrap_or("Unknown"))
                    .size(11.0)
                    .color(theme.text_dim),
            );
            ui.label(RichText::new(format_rating(show)).color(theme.rating));
        })
        .response
        .interact(Sense::click())
        .on_hover_cursor(CursorIcon::PointingHand);

    if response.hovered() {
        ui.painter().rect_stroke(
            response.rect,
            CornerRadius::same(6),
            Stroke::new(1.5, theme.accent),
            egui::StrokeKind::Inside,
        );
    }

    response.clicked()
}

/// A titled, horizontally scrolling row of cards. Returns the clicked show id.
pub fn render_show_row(
    theme: &Theme,
    ui: &mut egui::Ui,
    title: &str,
    shows: &[Arc<Show>],
) -> Option<u64> {
    let mut clicked = None;

    ui.label(RichText::new(title).size(18.0).strong().color(theme.text));
    ui.add_space(6.0);

    if shows.is_empty() {
        ui.label(RichText::new("No shows in this genre").color(theme.text_dim));
        return None;
    }

    egui::ScrollArea::horizontal()
        .id_salt(format!("row_{}", title))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for show in shows {
                    if show_card(theme, ui, show) {
                        clicked = Some(show.id);
                    }
                }
            });
        });

    clicked
}

/// Centered spinner with a caption
pub fn render_loading(theme: &Theme, ui: &mut egui::Ui, caption: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(RichText::new(caption).color(theme.text_dim));
    });
}

/// Inline error text with a Retry button. Returns true when Retry is clicked.
pub fn render_error(theme: &Theme, ui: &mut egui::Ui, text: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(text).color(theme.error).size(15.0));
        ui.add_space(8.0);
        retry = ui.button("Retry").clicked();
    });
    retry
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut ErtflixApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let mut selected = app.ui.theme_preset;
    let mut close = false;

    egui::Window::new("About Ertflix")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 260.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(
                    RichText::new("Ertflix")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new("TV show catalog browser")
                        .size(14.0)
                        .color(theme.text_dim),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_dim),
                );

                ui.add_space(12.0);
                if ui.link("Data from TVmaze").clicked() {
                    if let Err(e) = open::that("https://www.tvmaze.com/api") {
                        tracing::warn!("Failed to open browser: {}", e);
                    }
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label("Theme:");
                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(selected.name())
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                ui.selectable_value(&mut selected, *preset, preset.name());
                            }
                        });
                });

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
                ui.add_space(8.0);
            });
        });

    if selected != app.ui.theme_preset {
        app.select_theme(selected);
    }
    if close {
        app.ui.show_about_dialog = false;
    }
}
