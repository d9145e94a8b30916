/// Data layer: core types, loading, and validation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → HouseDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ HouseDataset │  named columns of Cell, row-aligned
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate │  Strict / Minimal profile → first violated rule
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod validate;
