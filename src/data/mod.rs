/// Data layer: core types, loading, filtering, and metric resolution.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, shift dates → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one shared Arc<Dataset> per source path
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  latest   │  last value by date per model
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod latest;
pub mod loader;
pub mod model;
