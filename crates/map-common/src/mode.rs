//! Map layer modes.

use serde::{Deserialize, Serialize};

/// How intensity observations are visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    /// Circular badges at station points.
    PointIcon,
    /// Square badges at area representative points.
    AreaIcon,
    /// Area polygons filled by intensity, plus square badges.
    AreaFill,
}

impl MapType {
    /// Badge size in pixels used by the viewport fit margins.
    pub fn icon_size(self) -> u32 {
        match self {
            MapType::AreaIcon => 32,
            _ => 18,
        }
    }

    /// Margin reserved around the fitted bounds, in pixels.
    pub fn fit_margin(self) -> f64 {
        match self {
            MapType::AreaFill => 40.0,
            other => other.icon_size() as f64 * 4.0,
        }
    }
}
