/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  car-sales.csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<CarRecord>, manufacturers, bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  manufacturer AND engine-size range → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered rows → .csv / .json
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
