/// Data layer: raw tables, typed records, loading, and row filtering.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (header order + raw rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  coerce against a Schema → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep matching / frequent rows before aggregation
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
