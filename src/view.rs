use crate::data::model::{Bounds, Dataset};

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One scatter marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Horsepower.
    pub x: f64,
    /// Fuel efficiency.
    pub y: f64,
    /// Price, fed through the colour scale. Missing prices plot grey.
    pub color: Option<f64>,
    /// Model name, reported back on hover.
    pub hover_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub points: Vec<ChartPoint>,
    /// Price bounds of the whole dataset, so colours stay put while filtering.
    pub color_bounds: Bounds,
}

impl ChartModel {
    /// Project the rows at `indices` into chart points. Rows without a
    /// horsepower or fuel efficiency have no position and are left out.
    pub fn build(dataset: &Dataset, indices: &[usize]) -> Self {
        let points = indices
            .iter()
            .filter_map(|&i| {
                let car = dataset.row(i)?;
                Some(ChartPoint {
                    x: car.horsepower?,
                    y: car.fuel_efficiency?,
                    color: car.price,
                    hover_key: car.model.clone(),
                })
            })
            .collect();

        ChartModel {
            points,
            color_bounds: dataset.price_bounds(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Detail model
// ---------------------------------------------------------------------------

/// Info-panel content for the hovered car.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModel {
    pub manufacturer: String,
    pub model: String,
    pub horsepower: Option<f64>,
    pub fuel_efficiency: Option<f64>,
    pub engine_size: Option<f64>,
    pub price: Option<f64>,
    pub sales: Option<f64>,
}

fn show(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| "n/a".to_string(), fmt)
}

impl DetailModel {
    /// Look up the first row whose model equals `hover_key`.
    pub fn lookup(dataset: &Dataset, hover_key: Option<&str>) -> Option<Self> {
        let car = dataset.find_by_model(hover_key?)?;
        Some(DetailModel {
            manufacturer: car.manufacturer.clone(),
            model: car.model.clone(),
            horsepower: car.horsepower,
            fuel_efficiency: car.fuel_efficiency,
            engine_size: car.engine_size,
            price: car.price,
            sales: car.sales,
        })
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }

    /// (label, value) pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Horsepower", show(self.horsepower, |v| format!("{v}"))),
            ("Fuel Efficiency", show(self.fuel_efficiency, |v| format!("{v}"))),
            ("Engine Size", show(self.engine_size, |v| format!("{v}L"))),
            ("Price", show(self.price, |v| format!("${v:.1}k"))),
            ("Sales", show(self.sales, |v| format!("{v:.1}k"))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{car, taurus_civic};

    #[test]
    fn chart_points_map_fields() {
        let ds = taurus_civic();
        let chart = ChartModel::build(&ds, &[0, 1]);
        assert_eq!(chart.points.len(), 2);
        let taurus = &chart.points[0];
        assert_eq!(taurus.x, 150.0);
        assert_eq!(taurus.y, 24.0);
        assert_eq!(taurus.color, Some(21.5));
        assert_eq!(taurus.hover_key, "Taurus");
        assert_eq!(chart.color_bounds, ds.price_bounds());
    }

    #[test]
    fn empty_subset_gives_empty_chart() {
        let ds = taurus_civic();
        assert!(ChartModel::build(&ds, &[]).is_empty());
    }

    #[test]
    fn hover_civic_shows_honda() {
        let ds = taurus_civic();
        let detail = DetailModel::lookup(&ds, Some("Civic")).unwrap();
        assert_eq!(detail.manufacturer, "Honda");
        assert_eq!(detail.horsepower, Some(110.0));
        assert_eq!(detail.title(), "Honda Civic");
        assert!(detail.fields().contains(&("Engine Size", "1.8L".to_string())));
    }

    #[test]
    fn rows_without_position_are_not_plotted() {
        let mut no_hp = car("Acura", "CL", 3.2, 0.0);
        no_hp.horsepower = None;
        let mut no_fe = car("Acura", "RL", 3.5, 210.0);
        no_fe.fuel_efficiency = None;
        let mut no_price = car("Acura", "TL", 3.2, 225.0);
        no_price.price = None;
        let ds = Dataset::from_rows(vec![no_hp, no_fe, no_price, car("Acura", "Integra", 1.8, 140.0)]).unwrap();

        let chart = ChartModel::build(&ds, &[0, 1, 2, 3]);
        let keys: Vec<&str> = chart.points.iter().map(|p| p.hover_key.as_str()).collect();
        assert_eq!(keys, ["TL", "Integra"]);
        assert_eq!(chart.points[0].color, None);
    }

    #[test]
    fn missing_values_show_as_not_available() {
        let mut cl = car("Acura", "CL", 3.2, 225.0);
        cl.price = None;
        cl.sales = None;
        let ds = Dataset::from_rows(vec![car("Acura", "Integra", 1.8, 140.0), cl]).unwrap();

        let detail = DetailModel::lookup(&ds, Some("CL")).unwrap();
        let fields = detail.fields();
        assert!(fields.contains(&("Price", "n/a".to_string())));
        assert!(fields.contains(&("Sales", "n/a".to_string())));
        assert!(fields.contains(&("Horsepower", "225".to_string())));
        assert!(fields.contains(&("Engine Size", "3.2L".to_string())));
    }

    #[test]
    fn hover_without_key_or_match_is_empty() {
        let ds = taurus_civic();
        assert!(DetailModel::lookup(&ds, None).is_none());
        assert!(DetailModel::lookup(&ds, Some("Beetle")).is_none());
    }

    #[test]
    fn duplicate_models_resolve_to_first_row() {
        let mut twin = car("Mercury", "Sable", 3.0, 153.0);
        twin.model = "Taurus".to_string();
        let ds = Dataset::from_rows(vec![car("Ford", "Taurus", 3.0, 150.0), twin]).unwrap();
        let detail = DetailModel::lookup(&ds, Some("Taurus")).unwrap();
        assert_eq!(detail.manufacturer, "Ford");
    }
}
