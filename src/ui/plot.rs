use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, Points, Text};

use crate::color::ColorScale;
use crate::controller::{Event, HoverData};
use crate::state::AppState;
use crate::view::ChartPoint;

/// Pointer distance (screen pixels) within which a marker counts as hovered.
const HOVER_RADIUS: f32 = 12.0;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the fuel efficiency vs. horsepower scatter and report hover changes
/// back to the controller.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState) {
    if state.chart.is_empty() {
        ui.label(RichText::new("No cars match the current filters.").italics());
    }

    let chart = &state.chart;
    let scale = ColorScale::new(chart.color_bounds);
    let hovered_key = state.selection().hovered.as_deref();
    let hovered_point = state.hovered_point;

    let response = Plot::new("fe_vs_hp")
        .x_axis_label("Horsepower")
        .y_axis_label("Fuel Efficiency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for point in &chart.points {
                let color = point.color.map_or(Color32::GRAY, |price| scale.color_for(price));
                let marker = Points::new(vec![[point.x, point.y]])
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .color(color);
                plot_ui.points(marker);
            }

            // Nearest marker to the pointer, in screen space.
            let nearest = plot_ui.response().hover_pos().and_then(|pointer| {
                chart
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let screen = plot_ui.screen_from_plot(PlotPoint::new(p.x, p.y));
                        (i, screen.distance(pointer))
                    })
                    .filter(|(_, d)| *d <= HOVER_RADIUS)
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(i, _)| i)
            });

            // Ring the marker actually under (or last under) the pointer. A
            // sticky hover that outlived a refilter falls back to the key.
            let highlight = nearest
                .or(hovered_point)
                .and_then(|i| chart.points.get(i))
                .or_else(|| hovered_key.and_then(|key| chart.points.iter().find(|p| p.hover_key == key)));

            if let Some(point) = highlight {
                plot_ui.points(
                    Points::new(vec![[point.x, point.y]])
                        .shape(MarkerShape::Circle)
                        .radius(8.0)
                        .filled(false)
                        .color(Color32::WHITE),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(point.x, point.y),
                        RichText::new(format!("  {}", point.hover_key)).strong(),
                    )
                    .anchor(Align2::LEFT_BOTTOM),
                );
            }

            nearest
        });

    let nearest = response.inner;
    let event = hover_event(
        state.selection().hovered.as_deref(),
        nearest.and_then(|i| state.chart.points.get(i)),
        state.clear_on_unhover,
    );
    if let Some(event) = event {
        state.emit(event);
    }
    if nearest.is_some() {
        state.hovered_point = nearest;
    }
}

/// Decide what the chart reports for this frame's pointer position.
///
/// A marker whose model differs from `current` is reported as a new hover.
/// Leaving all markers reports a clear only when `clear_on_unhover` is set
/// and something is hovered; otherwise the last hover sticks.
pub fn hover_event(current: Option<&str>, nearest: Option<&ChartPoint>, clear_on_unhover: bool) -> Option<Event> {
    match nearest {
        Some(point) if current != Some(point.hover_key.as_str()) => Some(Event::hover(Some(
            HoverData::single(&point.hover_key, point.x, point.y),
        ))),
        Some(_) => None,
        None if clear_on_unhover && current.is_some() => Some(Event::hover(None)),
        None => None,
    }
}
