//! The viewport fit algorithm.

use tracing::debug;

use map_common::{BoundingBox, Coordinate, IntensityLevel, MapType};

/// Scale floor in pixels per degree. A fit that would zoom out further
/// (continent-wide spans on a small canvas) stops here.
pub const MIN_SCALE: f64 = 10.0;

/// Scale ceiling in pixels per degree. Single-point or degenerate spans
/// resolve to this rather than an unbounded zoom.
pub const MAX_SCALE: f64 = 500.0;

/// Geometry lookups the fitter needs: the dataset-wide bounding box and
/// per-area vertex accumulation. Implemented by the topology dataset.
pub trait GeometrySource {
    /// Bounding box over every decoded vertex of every area.
    fn bounds(&self) -> BoundingBox;

    /// Fold every vertex of the coded area's polygons into `bounds`.
    /// Returns false when the code has no geometry (caller skips it).
    fn include_area_vertices(&self, code: &str, bounds: &mut BoundingBox) -> bool;
}

/// Point lookups for icon modes. Implemented by the location table.
pub trait PointSource {
    fn coordinate(&self, code: &str) -> Option<Coordinate>;
}

/// The per-render fit inputs: the (already collapsed) observation list,
/// optional epicenter, canvas size, layer mode, filter, and zoom.
#[derive(Debug, Clone)]
pub struct FitRequest<'a> {
    pub observations: &'a [(&'a str, IntensityLevel)],
    pub epicenter: Option<Coordinate>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub map_type: MapType,
    pub filter: IntensityLevel,
    pub zoom: f64,
}

/// A fitted viewport: bounds, scale, and centering offsets.
///
/// Recomputed per render call; never persisted. `project` is pure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: BoundingBox,
    /// Pixels per degree, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    half_margin: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Fit a viewport around the relevant features of a request.
    ///
    /// The relevant bounds collect the epicenter and every observation at
    /// or above the filter: whole polygons in `AreaFill` mode, single
    /// looked-up points in icon modes (codes with no known coordinate or
    /// geometry are skipped). When nothing qualifies, the dataset-wide
    /// bounds frame the whole map instead.
    pub fn fit(
        request: &FitRequest<'_>,
        geometry: &impl GeometrySource,
        points: &impl PointSource,
    ) -> Viewport {
        let mut relevant = BoundingBox::empty();

        if let Some(epicenter) = request.epicenter {
            relevant.include(epicenter);
        }

        for &(code, level) in request.observations {
            if level < request.filter {
                continue;
            }
            match request.map_type {
                MapType::AreaFill => {
                    geometry.include_area_vertices(code, &mut relevant);
                }
                MapType::AreaIcon | MapType::PointIcon => {
                    if let Some(coordinate) = points.coordinate(code) {
                        relevant.include(coordinate);
                    }
                }
            }
        }

        if relevant.is_empty() {
            relevant = geometry.bounds();
        }

        let margin = request.map_type.fit_margin();
        let width = request.canvas_width as f64;
        let height = request.canvas_height as f64;

        // A zero span yields an unconstrained (infinite) candidate on that
        // axis; the other axis or the ceiling clamp bounds the result.
        let candidate = |extent: f64, span: f64| {
            if span > 0.0 {
                extent / span
            } else {
                f64::INFINITY
            }
        };
        let scale = candidate(width - margin, relevant.lon_span())
            .min(candidate(height - margin, relevant.lat_span()))
            * request.zoom;
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);

        let offset_x = (width - relevant.lon_span() * scale) / 2.0;
        let offset_y = (height - relevant.lat_span() * scale) / 2.0;

        debug!(scale, offset_x, offset_y, "viewport fitted");

        Viewport {
            bounds: relevant,
            scale,
            offset_x,
            offset_y,
            half_margin: margin / 2.0,
            canvas_height: height,
        }
    }

    /// Project a geographic coordinate to canvas pixels.
    ///
    /// Latitude increases upward in source data while pixel rows increase
    /// downward, so the y axis flips.
    pub fn project(&self, coordinate: Coordinate) -> (f32, f32) {
        let x = (coordinate.longitude - self.bounds.min_lon) * self.scale
            + self.half_margin
            + self.offset_x;
        let y = self.canvas_height
            - ((coordinate.latitude - self.bounds.min_lat) * self.scale
                + self.half_margin
                + self.offset_y);
        (x as f32, y as f32)
    }
}
