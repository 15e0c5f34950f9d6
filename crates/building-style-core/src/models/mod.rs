//! Data models for building style metadata.
//!
//! - `BuildingStyleInfo`: one style's name, author and description
//! - `Catalog`: every known style, keyed by its numeric id

pub mod building_style;

pub use building_style::{BuildingStyleInfo, Catalog};
