/// Data layer: result files, loading, and per-action selection.
///
/// Architecture:
/// ```text
///  result/json/<platform>/<action>-<language>.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file name + JSON → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  Vec<Series>  │  flat, one per file
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  one action, language catalog order → Vec<&Series>
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
