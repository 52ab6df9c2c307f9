//! Geographic bounding box accumulation and queries.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A geographic bounding box in degrees.
///
/// Starts out empty (inverted infinities) and grows as points are folded
/// in, so callers can accumulate over an arbitrary point stream and then
/// ask whether anything was collected at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// An empty box that contains nothing until points are included.
    pub fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon || self.min_lat > self.max_lat
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, point: Coordinate) {
        self.min_lon = self.min_lon.min(point.longitude);
        self.max_lon = self.max_lon.max(point.longitude);
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lat = self.max_lat.max(point.latitude);
    }

    /// Longitude span in degrees. Zero for a single point.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees. Zero for a single point.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
