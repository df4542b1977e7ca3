use std::collections::HashMap;

use crate::context::AppContext;
use crate::data::filter::{Category, EngineRange, filter, filtered_indices};
use crate::data::model::CarRecord;
use crate::view::{ChartModel, DetailModel};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    ManufacturerDropdown,
    EngineSizeSlider,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The widget's value changed.
    Value,
    /// The pointer moved onto a different chart point (or off all of them).
    Hover,
}

/// One hovered marker as reported by the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPoint {
    /// Model name attached to the marker.
    pub hover_text: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// Hover report from the chart. Only the first point is used.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoverData {
    pub points: Vec<HoverPoint>,
}

impl HoverData {
    pub fn single(hover_text: &str, x: f64, y: f64) -> Self {
        HoverData {
            points: vec![HoverPoint {
                hover_text: Some(hover_text.to_string()),
                x,
                y,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Category(Category),
    Range(EngineRange),
    /// `None` means the hover was cleared.
    Hover(Option<HoverData>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub source: WidgetId,
    pub kind: EventKind,
    pub payload: Payload,
}

impl Event {
    pub fn category(category: Category) -> Self {
        Event {
            source: WidgetId::ManufacturerDropdown,
            kind: EventKind::Value,
            payload: Payload::Category(category),
        }
    }

    pub fn engine_range(range: EngineRange) -> Self {
        Event {
            source: WidgetId::EngineSizeSlider,
            kind: EventKind::Value,
            payload: Payload::Range(range),
        }
    }

    pub fn hover(data: Option<HoverData>) -> Self {
        Event {
            source: WidgetId::Chart,
            kind: EventKind::Hover,
            payload: Payload::Hover(data),
        }
    }
}

/// What the shell has to re-render.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Chart(ChartModel),
    /// `None` clears the info panel.
    Detail(Option<DetailModel>),
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Current filter and hover choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: Category,
    pub engine_range: EngineRange,
    /// Model name of the hovered point.
    pub hovered: Option<String>,
}

impl Selection {
    /// No category filter, full engine-size span, nothing hovered.
    pub fn initial(context: &AppContext) -> Self {
        Selection {
            category: Category::All,
            engine_range: EngineRange::full(context.dataset()),
            hovered: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub type Handler = fn(&AppContext, &mut Selection, Payload) -> Vec<Output>;

pub struct Controller {
    context: AppContext,
    selection: Selection,
    handlers: HashMap<(WidgetId, EventKind), Handler>,
}

impl Controller {
    pub fn new(context: AppContext) -> Self {
        let selection = Selection::initial(&context);
        let mut controller = Controller {
            context,
            selection,
            handlers: HashMap::new(),
        };
        controller.register(WidgetId::ManufacturerDropdown, EventKind::Value, on_category);
        controller.register(WidgetId::EngineSizeSlider, EventKind::Value, on_engine_range);
        controller.register(WidgetId::Chart, EventKind::Hover, on_hover);
        controller
    }

    /// Bind `handler` to events of `kind` coming from `source`, replacing any
    /// previous binding.
    pub fn register(&mut self, source: WidgetId, kind: EventKind, handler: Handler) {
        self.handlers.insert((source, kind), handler);
    }

    /// Run the handler bound to the event's (source, kind) pair.
    pub fn dispatch(&mut self, event: Event) -> Vec<Output> {
        let Some(handler) = self.handlers.get(&(event.source, event.kind)).copied() else {
            log::warn!("No handler for {:?}/{:?}, event dropped", event.source, event.kind);
            return Vec::new();
        };
        log::debug!("Dispatching {:?}/{:?}", event.source, event.kind);
        handler(&self.context, &mut self.selection, event.payload)
    }

    /// Outputs for the current selection, used for the first frame and after
    /// the dataset is replaced.
    pub fn render_all(&self) -> Vec<Output> {
        vec![
            chart_output(&self.context, &self.selection),
            detail_output(&self.context, &self.selection),
        ]
    }

    /// Swap in a freshly loaded context and reset the selection.
    pub fn replace_context(&mut self, context: AppContext) -> Vec<Output> {
        self.selection = Selection::initial(&context);
        self.context = context;
        self.render_all()
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Rows of the current filtered view.
    pub fn visible_rows(&self) -> Vec<&CarRecord> {
        filter(
            self.context.dataset(),
            &self.selection.category,
            &self.selection.engine_range,
        )
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn chart_output(context: &AppContext, selection: &Selection) -> Output {
    let dataset = context.dataset();
    let indices = filtered_indices(dataset, &selection.category, &selection.engine_range);
    log::debug!(
        "{} of {} cars match {} in {:.1}..={:.1}",
        indices.len(),
        dataset.len(),
        selection.category,
        selection.engine_range.lo(),
        selection.engine_range.hi()
    );
    Output::Chart(ChartModel::build(dataset, &indices))
}

fn detail_output(context: &AppContext, selection: &Selection) -> Output {
    Output::Detail(DetailModel::lookup(context.dataset(), selection.hovered.as_deref()))
}

fn on_category(context: &AppContext, selection: &mut Selection, payload: Payload) -> Vec<Output> {
    match payload {
        Payload::Category(category) => {
            selection.category = category;
            vec![chart_output(context, selection)]
        }
        other => {
            log::warn!("Manufacturer dropdown sent {other:?}, ignoring");
            Vec::new()
        }
    }
}

fn on_engine_range(context: &AppContext, selection: &mut Selection, payload: Payload) -> Vec<Output> {
    match payload {
        Payload::Range(range) => {
            selection.engine_range = range;
            vec![chart_output(context, selection)]
        }
        other => {
            log::warn!("Engine size slider sent {other:?}, ignoring");
            Vec::new()
        }
    }
}

fn on_hover(context: &AppContext, selection: &mut Selection, payload: Payload) -> Vec<Output> {
    let hover = match payload {
        Payload::Hover(hover) => hover,
        other => {
            log::warn!("Chart hover sent {other:?}, clearing details");
            selection.hovered = None;
            return vec![Output::Detail(None)];
        }
    };

    selection.hovered = match hover {
        None => None,
        Some(data) => match data.points.into_iter().next() {
            Some(HoverPoint { hover_text: Some(key), x, y }) => {
                log::debug!("Hovering {key} at ({x}, {y})");
                Some(key)
            }
            _ => {
                log::warn!("Hover payload without hover text, clearing details");
                None
            }
        },
    };
    vec![detail_output(context, selection)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{showroom, taurus_civic};

    fn controller() -> Controller {
        Controller::new(AppContext::new(showroom(), None))
    }

    fn chart_of(outputs: Vec<Output>) -> ChartModel {
        match outputs.into_iter().next() {
            Some(Output::Chart(chart)) => chart,
            other => panic!("expected a chart output, got {other:?}"),
        }
    }

    fn detail_of(outputs: Vec<Output>) -> Option<DetailModel> {
        match outputs.into_iter().next() {
            Some(Output::Detail(detail)) => detail,
            other => panic!("expected a detail output, got {other:?}"),
        }
    }

    fn models(chart: &ChartModel) -> Vec<&str> {
        chart.points.iter().map(|p| p.hover_key.as_str()).collect()
    }

    #[test]
    fn initial_render_shows_everything() {
        let c = controller();
        let outputs = c.render_all();
        assert_eq!(outputs.len(), 2);
        assert_eq!(chart_of(outputs.clone()).points.len(), 6);
        assert_eq!(outputs[1], Output::Detail(None));
        assert_eq!(c.visible_rows().len(), 6);
    }

    #[test]
    fn category_then_range_equals_range_then_category() {
        let ford = Category::Manufacturer("Ford".to_string());
        let range = EngineRange::new(2.5, 5.0);

        let mut a = controller();
        a.dispatch(Event::category(ford.clone()));
        let chart_a = chart_of(a.dispatch(Event::engine_range(range)));

        let mut b = controller();
        b.dispatch(Event::engine_range(range));
        let chart_b = chart_of(b.dispatch(Event::category(ford)));

        assert_eq!(chart_a, chart_b);
        assert_eq!(models(&chart_a), ["Taurus", "Mustang"]);
    }

    #[test]
    fn repeated_selection_is_stable() {
        let mut c = controller();
        let honda = Category::Manufacturer("Honda".to_string());
        let first = chart_of(c.dispatch(Event::category(honda.clone())));
        let second = chart_of(c.dispatch(Event::category(honda)));
        assert_eq!(first, second);
    }

    #[test]
    fn hover_and_clear() {
        let mut c = Controller::new(AppContext::new(taurus_civic(), None));
        let detail = detail_of(c.dispatch(Event::hover(Some(HoverData::single("Civic", 110.0, 32.0)))));
        let detail = detail.unwrap();
        assert_eq!(detail.manufacturer, "Honda");
        assert_eq!(detail.horsepower, Some(110.0));
        assert_eq!(c.selection().hovered.as_deref(), Some("Civic"));

        assert_eq!(detail_of(c.dispatch(Event::hover(None))), None);
        assert_eq!(c.selection().hovered, None);
    }

    #[test]
    fn malformed_hover_clears_details() {
        let mut c = controller();
        c.dispatch(Event::hover(Some(HoverData::single("Taurus", 150.0, 28.0))));

        let empty = Event::hover(Some(HoverData::default()));
        assert_eq!(detail_of(c.dispatch(empty)), None);

        let no_text = Event::hover(Some(HoverData {
            points: vec![HoverPoint { hover_text: None, x: 1.0, y: 2.0 }],
        }));
        assert_eq!(detail_of(c.dispatch(no_text)), None);

        let wrong_shape = Event {
            payload: Payload::Range(EngineRange::new(1.0, 2.0)),
            ..Event::hover(None)
        };
        assert_eq!(detail_of(c.dispatch(wrong_shape)), None);
    }

    #[test]
    fn wrong_payload_leaves_filters_alone() {
        let mut c = controller();
        let before = c.selection().clone();
        let event = Event {
            payload: Payload::Hover(None),
            ..Event::category(Category::All)
        };
        assert!(c.dispatch(event).is_empty());
        assert_eq!(c.selection(), &before);
    }

    #[test]
    fn unbound_event_is_dropped() {
        let mut c = controller();
        let event = Event {
            source: WidgetId::Chart,
            kind: EventKind::Value,
            payload: Payload::Category(Category::All),
        };
        assert!(c.dispatch(event).is_empty());
    }

    #[test]
    fn registered_handler_replaces_default() {
        fn silent(_: &AppContext, _: &mut Selection, _: Payload) -> Vec<Output> {
            Vec::new()
        }
        let mut c = controller();
        c.register(WidgetId::ManufacturerDropdown, EventKind::Value, silent);
        assert!(c.dispatch(Event::category(Category::All)).is_empty());
    }

    #[test]
    fn replacing_context_resets_selection() {
        let mut c = controller();
        c.dispatch(Event::category(Category::Manufacturer("Ford".to_string())));
        c.dispatch(Event::hover(Some(HoverData::single("Focus", 107.0, 28.0))));

        let outputs = c.replace_context(AppContext::new(taurus_civic(), None));
        assert_eq!(c.selection().category, Category::All);
        assert_eq!(c.selection().hovered, None);
        assert_eq!(c.selection().engine_range, EngineRange::new(1.8, 3.0));
        assert_eq!(chart_of(outputs).points.len(), 2);
    }
}
