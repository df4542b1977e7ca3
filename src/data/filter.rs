use std::fmt;

use super::model::{CarRecord, Dataset};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Manufacturer selector value. `All` is the "no filter" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Manufacturer(String),
}

impl Category {
    pub fn matches(&self, record: &CarRecord) -> bool {
        match self {
            Category::All => true,
            Category::Manufacturer(name) => record.manufacturer == *name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => write!(f, "All Manufacturers"),
            Category::Manufacturer(name) => write!(f, "{name}"),
        }
    }
}

/// Inclusive engine-size interval. Endpoints are always ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineRange {
    lo: f64,
    hi: f64,
}

impl EngineRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            EngineRange { lo: a, hi: b }
        } else {
            EngineRange { lo: b, hi: a }
        }
    }

    /// The full observed engine-size span of `dataset`.
    pub fn full(dataset: &Dataset) -> Self {
        let b = dataset.engine_size_bounds();
        EngineRange::new(b.min, b.max)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// A missing value is never inside the range.
    pub fn contains(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| self.lo <= v && v <= self.hi)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

fn keep(car: &CarRecord, category: &Category, range: &EngineRange) -> bool {
    range.contains(car.engine_size) && category.matches(car)
}

/// Return indices (ascending) of rows inside `range` and matching `category`.
pub fn filtered_indices(dataset: &Dataset, category: &Category, range: &EngineRange) -> Vec<usize> {
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, car)| keep(car, category, range))
        .map(|(i, _)| i)
        .collect()
}

/// The rows selected by [`filtered_indices`], in file order.
pub fn filter<'a>(dataset: &'a Dataset, category: &Category, range: &EngineRange) -> Vec<&'a CarRecord> {
    filtered_indices(dataset, category, range)
        .into_iter()
        .filter_map(|i| dataset.row(i))
        .collect()
}
