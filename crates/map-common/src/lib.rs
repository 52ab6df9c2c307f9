//! Common types and utilities shared across the quake-map crates.

pub mod bbox;
pub mod color;
pub mod coordinate;
pub mod error;
pub mod intensity;
pub mod locations;
pub mod mode;

pub use bbox::BoundingBox;
pub use color::{Color, ColorScheme, IntensityColors};
pub use coordinate::Coordinate;
pub use error::{MapError, MapResult};
pub use intensity::{IntensityLevel, IntensityObservation};
pub use locations::LocationTable;
pub use mode::MapType;
