use std::path::Path;

use crate::context::AppContext;
use crate::controller::{Controller, Event, HoverData, Output, Selection};
use crate::data::filter::{Category, EngineRange};
use crate::data::{export, loader};
use crate::view::{ChartModel, DetailModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    controller: Controller,

    /// Last chart model emitted by the controller.
    pub chart: ChartModel,

    /// Last info-panel content emitted by the controller.
    pub detail: Option<DetailModel>,

    /// Index into `chart.points` of the marker last under the pointer. Models
    /// are not unique, so the highlight follows this rather than the key.
    pub hovered_point: Option<usize>,

    /// Clear the info panel when the pointer leaves all points.
    pub clear_on_unhover: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(context: AppContext, clear_on_unhover: bool) -> Self {
        let controller = Controller::new(context);
        let chart = ChartModel::build(controller.context().dataset(), &[]);
        let mut state = AppState {
            chart,
            detail: None,
            hovered_point: None,
            clear_on_unhover,
            status_message: None,
            controller,
        };
        let outputs = state.controller.render_all();
        state.apply(outputs);
        state
    }

    pub fn context(&self) -> &AppContext {
        self.controller.context()
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    /// Hand an event to the controller and take its outputs.
    pub fn emit(&mut self, event: Event) {
        let outputs = self.controller.dispatch(event);
        self.apply(outputs);
    }

    fn apply(&mut self, outputs: Vec<Output>) {
        for output in outputs {
            match output {
                Output::Chart(chart) => {
                    self.chart = chart;
                    self.hovered_point = None;
                }
                Output::Detail(detail) => {
                    if detail.is_none() {
                        self.hovered_point = None;
                    }
                    self.detail = detail;
                }
            }
        }
    }

    pub fn select_category(&mut self, category: Category) {
        self.emit(Event::category(category));
    }

    pub fn set_engine_range(&mut self, range: EngineRange) {
        self.emit(Event::engine_range(range));
    }

    pub fn hover(&mut self, data: Option<HoverData>) {
        self.emit(Event::hover(data));
    }

    /// Load another file. On failure the current dataset stays and the error
    /// goes to the status line.
    pub fn open_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                let outputs = self
                    .controller
                    .replace_context(AppContext::new(dataset, Some(path.to_path_buf())));
                self.apply(outputs);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the current filtered view to `path`.
    pub fn export_visible(&mut self, path: &Path) {
        let rows = self.controller.visible_rows();
        match export::export_file(path, &rows) {
            Ok(n) => {
                self.status_message = Some(format!("Exported {n} cars to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::showroom;

    fn state() -> AppState {
        AppState::new(AppContext::new(showroom(), None), false)
    }

    #[test]
    fn starts_with_full_chart_and_empty_panel() {
        let s = state();
        assert_eq!(s.chart.points.len(), 6);
        assert!(s.detail.is_none());
        assert_eq!(s.chart.color_bounds.min, 20.0);
    }

    #[test]
    fn events_update_rendered_models() {
        let mut s = state();
        s.select_category(Category::Manufacturer("Honda".to_string()));
        assert_eq!(s.chart.points.len(), 2);

        s.set_engine_range(EngineRange::new(2.3, 2.3));
        assert_eq!(s.chart.points.len(), 1);
        assert_eq!(s.chart.points[0].hover_key, "Accord");

        s.hover(Some(HoverData::single("Accord", 135.0, 28.0)));
        assert_eq!(s.detail.as_ref().map(|d| d.title()), Some("Honda Accord".to_string()));
    }

    #[test]
    fn hovered_point_resets_with_chart_and_clear() {
        let mut s = state();
        s.hovered_point = Some(4);
        s.select_category(Category::Manufacturer("Honda".to_string()));
        assert_eq!(s.hovered_point, None);

        s.hover(Some(HoverData::single("Civic", 110.0, 28.0)));
        s.hovered_point = Some(0);
        s.hover(None);
        assert_eq!(s.hovered_point, None);
        assert!(s.detail.is_none());
    }

    #[test]
    fn failed_open_keeps_dataset() {
        let mut s = state();
        s.open_file(Path::new("/nonexistent/cars.csv"));
        assert!(s.status_message.is_some());
        assert_eq!(s.context().dataset().len(), 6);
    }
}
