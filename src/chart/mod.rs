/// Chart layer: declarative description per action, and its rasterization.
///
/// ```text
///   Vec<&Series> (one action)
///        │
///        ▼
///   ┌─────────────┐
///   │ description  │  labels, datasets, axis titles, legend
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  render   │  plotters bitmap → PNG bytes
///   └──────────┘
/// ```

pub mod description;
pub mod render;
