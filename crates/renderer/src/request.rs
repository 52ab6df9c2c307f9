//! Per-render request parameters.

use std::collections::HashMap;

use image::RgbaImage;

use map_common::{Coordinate, IntensityLevel, IntensityObservation, MapType};

/// Everything one render call consumes. Transient; constructed per
/// update event and dropped with the produced raster.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub observations: Vec<IntensityObservation>,
    pub epicenter: Option<Coordinate>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub map_type: MapType,
    /// Minimum severity an observation must meet to participate in the
    /// viewport fit; in `PointIcon` mode, below-threshold points also
    /// demote to small unlabeled dots. Area fills and badges always draw.
    pub filter: IntensityLevel,
    /// Independently produced side panel, composited last at a fixed
    /// top-left offset.
    pub side_overlay: Option<RgbaImage>,
    pub zoom: f64,
}

impl MapRequest {
    pub fn new(
        observations: Vec<IntensityObservation>,
        canvas_width: u32,
        canvas_height: u32,
        map_type: MapType,
        filter: IntensityLevel,
    ) -> Self {
        Self {
            observations,
            epicenter: None,
            canvas_width,
            canvas_height,
            map_type,
            filter,
            side_overlay: None,
            zoom: 1.0,
        }
    }

    pub fn with_epicenter(mut self, epicenter: Coordinate) -> Self {
        self.epicenter = Some(epicenter);
        self
    }

    pub fn with_side_overlay(mut self, overlay: RgbaImage) -> Self {
        self.side_overlay = Some(overlay);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Collapse the observation list by code. Upstream lists may repeat
    /// a code; later entries win.
    pub fn observation_map(&self) -> HashMap<&str, IntensityLevel> {
        let mut map = HashMap::with_capacity(self.observations.len());
        for observation in &self.observations {
            map.insert(observation.code.as_str(), observation.level);
        }
        map
    }

    /// Maximum severity across all observations (before filtering),
    /// used by the area-name label-suppression rule.
    pub fn max_level(&self) -> Option<IntensityLevel> {
        self.observations.iter().map(|o| o.level).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_codes_last_write_wins() {
        let request = MapRequest::new(
            vec![
                IntensityObservation::new("100", IntensityLevel::Three),
                IntensityObservation::new("100", IntensityLevel::FiveUpper),
            ],
            640,
            480,
            MapType::PointIcon,
            IntensityLevel::One,
        );

        let map = request.observation_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["100"], IntensityLevel::FiveUpper);
    }

    #[test]
    fn test_max_level_ignores_filter() {
        let request = MapRequest::new(
            vec![
                IntensityObservation::new("100", IntensityLevel::One),
                IntensityObservation::new("200", IntensityLevel::Seven),
            ],
            640,
            480,
            MapType::AreaFill,
            IntensityLevel::Four,
        );
        assert_eq!(request.max_level(), Some(IntensityLevel::Seven));
    }
}
