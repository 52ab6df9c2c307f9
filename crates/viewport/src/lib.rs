//! Automatic viewport fitting and coordinate→pixel projection.
//!
//! Given the features relevant to one render request (epicenter plus the
//! observations passing the severity filter), computes a bounding box, a
//! clamped scale factor, and centering offsets, and exposes the pure
//! projection from geographic coordinates to canvas pixels.

pub mod fit;

pub use fit::{FitRequest, GeometrySource, PointSource, Viewport, MAX_SCALE, MIN_SCALE};
