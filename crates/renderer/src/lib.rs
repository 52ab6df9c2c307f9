//! Raster rendering of seismic intensity maps.
//!
//! Composites, in fixed order: sea background, neutral land fill,
//! intensity-colored area fill, boundary strokes, intensity badges with
//! optional area-name labels, the epicenter marker, and the side
//! information overlay. One `MapRequest` in, one RGBA raster out.

pub mod draw;
pub mod icons;
pub mod map;
pub mod png;
pub mod request;
pub mod style;

pub use map::{MapAssets, MapRenderer};
pub use request::MapRequest;
pub use style::IntensityColorModel;
