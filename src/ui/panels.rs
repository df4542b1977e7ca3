use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorScale;
use crate::data::filter::{Category, EngineRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and info panel
// ---------------------------------------------------------------------------

/// Render the left panel: manufacturer dropdown, engine size range,
/// price legend and the hovered car's details.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    manufacturer_dropdown(ui, state);
    ui.add_space(8.0);
    engine_size_range(ui, state);
    ui.separator();
    price_legend(ui, state);
    ui.separator();
    info_panel(ui, state);
}

fn manufacturer_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Manufacturer");

    let current = state.selection().category.clone();
    let mut chosen: Option<Category> = None;
    egui::ComboBox::from_id_salt("manufacturer_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.context().category_options() {
                let is_current = option == current;
                if ui.selectable_label(is_current, option.to_string()).clicked() && !is_current {
                    chosen = Some(option);
                }
            }
        });

    if let Some(category) = chosen {
        state.select_category(category);
    }
}

fn engine_size_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Engine Size (L)");

    let bounds = state.context().dataset().engine_size_bounds();
    let current = state.selection().engine_range;
    let (mut lo, mut hi) = (current.lo(), current.hi());

    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, bounds.min..=bounds.max).text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, bounds.min..=bounds.max).text("max"))
        .changed();

    // Keep the handles ordered: the one being dragged pushes the other.
    if lo > hi {
        if lo_changed {
            hi = lo;
        } else {
            lo = hi;
        }
    }

    let mut next = (lo_changed || hi_changed).then(|| EngineRange::new(lo, hi));
    if ui.small_button("Reset").clicked() {
        next = Some(EngineRange::full(state.context().dataset()));
    }
    if let Some(range) = next.filter(|r| *r != current) {
        state.set_engine_range(range);
    }
}

fn price_legend(ui: &mut Ui, state: &AppState) {
    ui.strong("Price (thousands)");
    let scale = ColorScale::new(state.chart.color_bounds);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{:.1}", scale.min()));
        for (_, color) in scale.stops(8) {
            ui.label(RichText::new("■").color(color));
        }
        ui.label(format!("{:.1}", scale.max()));
    });
}

/// Details of the hovered car, or a hint when nothing is hovered.
fn info_panel(ui: &mut Ui, state: &AppState) {
    let Some(detail) = &state.detail else {
        ui.label(RichText::new("Hover a point to see details.").weak());
        return;
    };

    ui.heading(detail.title());
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .body(|mut body| {
            for (label, value) in detail.fields() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(label);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export filtered…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} cars loaded, {} visible",
            state.context().dataset().len(),
            state.chart.points.len()
        ));

        if let Some(source) = state.context().source() {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open car listings")
        .add_filter("Supported files", &["csv", "tsv", "tab", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered cars")
        .set_file_name("filtered-cars.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_visible(&path);
    }
}
