/// Data layer: core types, loading, option derivation and filtering.
///
/// Architecture:
/// ```text
///  file path / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch bytes, parse CSV → Dataset
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐      ┌───────────┐
///   │ options   │      │  filter    │  FilterController: current view
///   └──────────┘      └───────────┘
///   distinct values    narrowed by (column, value) events
///   per schema column
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
