use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CarRecord – one row of the listings table
// ---------------------------------------------------------------------------

/// A single car listing. Fields are bound to the source header by name, so
/// column order in the file does not matter and extra columns are ignored.
/// Numeric cells may be blank; those read as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    /// Price in thousands.
    #[serde(rename = "Price In Thousands")]
    pub price: Option<f64>,
    /// Sales in thousands.
    #[serde(rename = "Sales In Thousands")]
    pub sales: Option<f64>,
    /// Engine displacement in litres.
    #[serde(rename = "Engine Size")]
    pub engine_size: Option<f64>,
    #[serde(rename = "Horsepower")]
    pub horsepower: Option<f64>,
    #[serde(rename = "Fuel Efficiency")]
    pub fuel_efficiency: Option<f64>,
}

/// Header names every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Manufacturer",
    "Model",
    "Price In Thousands",
    "Sales In Thousands",
    "Engine Size",
    "Horsepower",
    "Fuel Efficiency",
];

// ---------------------------------------------------------------------------
// Bounds – observed min/max of a numeric column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Bounds { min: v, max: v }),
            Some(b) => Some(Bounds {
                min: b.min.min(v),
                max: b.max.max(v),
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded listings with pre-computed indices. Never mutated after
/// construction; loading another file builds a new `Dataset`.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<CarRecord>,
    /// Distinct manufacturers in first-appearance order.
    manufacturers: Vec<String>,
    engine_size: Bounds,
    price: Bounds,
}

impl Dataset {
    /// Build the dataset and its indices. Bounds only count present values;
    /// returns `None` when no row has an engine size or none has a price,
    /// since the range control and colour scale need both.
    pub fn from_rows(rows: Vec<CarRecord>) -> Option<Self> {
        let engine_size = Bounds::of(rows.iter().filter_map(|r| r.engine_size))?;
        let price = Bounds::of(rows.iter().filter_map(|r| r.price))?;

        let mut manufacturers: Vec<String> = Vec::new();
        for row in &rows {
            if !manufacturers.contains(&row.manufacturer) {
                manufacturers.push(row.manufacturer.clone());
            }
        }

        Some(Dataset {
            rows,
            manufacturers,
            engine_size,
            price,
        })
    }

    pub fn rows(&self) -> &[CarRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&CarRecord> {
        self.rows.get(index)
    }

    pub fn manufacturers(&self) -> &[String] {
        &self.manufacturers
    }

    pub fn engine_size_bounds(&self) -> Bounds {
        self.engine_size
    }

    pub fn price_bounds(&self) -> Bounds {
        self.price
    }

    /// First row (in file order) whose model equals `model`.
    pub fn find_by_model(&self, model: &str) -> Option<&CarRecord> {
        self.rows.iter().find(|r| r.model == model)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{car, showroom};
    use super::*;

    #[test]
    fn manufacturers_keep_first_appearance_order() {
        let ds = showroom();
        assert_eq!(ds.manufacturers(), &["Ford", "Honda", "Toyota"]);
    }

    #[test]
    fn bounds_cover_all_rows() {
        let ds = showroom();
        let b = ds.engine_size_bounds();
        assert_eq!(b.min, 1.8);
        assert_eq!(b.max, 4.6);
    }

    #[test]
    fn empty_table_has_no_dataset() {
        assert!(Dataset::from_rows(Vec::new()).is_none());
    }

    #[test]
    fn bounds_skip_missing_values() {
        let mut unknown = car("Acura", "CL", 0.0, 225.0);
        unknown.engine_size = None;
        unknown.price = None;
        let mut pricey = car("Acura", "RL", 3.5, 210.0);
        pricey.price = Some(42.0);
        let ds = Dataset::from_rows(vec![car("Acura", "Integra", 1.8, 140.0), unknown, pricey]).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
        assert_eq!(ds.engine_size_bounds(), Bounds { min: 1.8, max: 3.5 });
        assert_eq!(ds.price_bounds(), Bounds { min: 20.0, max: 42.0 });
    }

    #[test]
    fn no_engine_sizes_means_no_dataset() {
        let mut blank = car("Acura", "CL", 0.0, 225.0);
        blank.engine_size = None;
        assert!(Dataset::from_rows(vec![blank]).is_none());
    }

    #[test]
    fn find_by_model_returns_first_match() {
        let mut second = car("Mercury", "Sable", 3.0, 153.0);
        second.model = "Taurus".to_string();
        let ds = Dataset::from_rows(vec![car("Ford", "Taurus", 3.0, 150.0), second]).unwrap();
        let found = ds.find_by_model("Taurus").unwrap();
        assert_eq!(found.manufacturer, "Ford");
        assert!(ds.find_by_model("Beetle").is_none());
    }
}
