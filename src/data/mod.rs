/// Data layer: table model, loading, prediction and plotting series.
///
/// Architecture:
/// ```text
///     data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  columns + rows in source order
///   └──────────┘
///     │      │
///     ▼      ▼
///  predict  series   mean vs threshold │ timestamp → chart points
/// ```

pub mod loader;
pub mod model;
pub mod predict;
pub mod series;
