//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

/// A geographic point as `(longitude, latitude)` in degrees.
///
/// Longitude comes first to match the topology document's axis order.
/// Immutable value type; construct explicitly with [`Coordinate::new`]
/// rather than converting from upstream point types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}
