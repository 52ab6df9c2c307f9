//! Code-keyed location and display-name lookup tables.
//!
//! Reference data arrives as flat delimited records, one location per
//! line. Two record shapes exist upstream:
//!
//! - `code,name,lat,lon` — areas and stations (name may be blank)
//! - `code,name` — display-name-only supplements
//!
//! Several files are merged into one table; later records overwrite
//! earlier ones per code.

use std::collections::HashMap;

use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::{MapError, MapResult};

/// Lookup from a location code to its coordinate and display name.
///
/// Loaded once at process start; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    coordinates: HashMap<String, Coordinate>,
    names: HashMap<String, String>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one delimited document into the table.
    pub fn merge_records(&mut self, text: &str) -> MapResult<()> {
        let mut rows = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            match fields.as_slice() {
                [code, name] => {
                    self.names.insert(code.to_string(), name.to_string());
                }
                [code, name, lat, lon] => {
                    let lat: f64 = lat.parse().map_err(|_| {
                        MapError::InvalidLocationRecord(format!("bad latitude: {}", line))
                    })?;
                    let lon: f64 = lon.parse().map_err(|_| {
                        MapError::InvalidLocationRecord(format!("bad longitude: {}", line))
                    })?;
                    self.coordinates
                        .insert(code.to_string(), Coordinate::new(lon, lat));
                    if !name.is_empty() {
                        self.names.insert(code.to_string(), name.to_string());
                    }
                }
                _ => {
                    return Err(MapError::InvalidLocationRecord(line.to_string()));
                }
            }
            rows += 1;
        }

        debug!(rows, total = self.coordinates.len(), "merged location records");
        Ok(())
    }

    /// Insert or replace a single location programmatically.
    pub fn insert(&mut self, code: impl Into<String>, coordinate: Coordinate) {
        self.coordinates.insert(code.into(), coordinate);
    }

    pub fn coordinate(&self, code: &str) -> Option<Coordinate> {
        self.coordinates.get(code).copied()
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
