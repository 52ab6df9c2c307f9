//! The map renderer: immutable shared state plus the layer pipeline.

use std::time::Instant;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rusttype::Font;
use tracing::debug;

use map_common::{
    BoundingBox, ColorScheme, Coordinate, IntensityLevel, LocationTable, MapError, MapResult,
    MapType,
};
use topology::{RingPoint, TopologyDataset};
use viewport::{FitRequest, GeometrySource, PointSource, Viewport};

use crate::draw::{fill_polygon, stroke_edge, to_rgba};
use crate::icons::{
    draw_area_badge, draw_demoted_dot, draw_epicenter_cross, draw_point_badge,
};
use crate::png;
use crate::request::MapRequest;
use crate::style::IntensityColorModel;

/// Pixel offset of the composited side overlay.
const OVERLAY_OFFSET: (i64, i64) = (8, 10);

/// Host-supplied rendering assets.
///
/// The font drives badge glyphs and area-name labels; without one those
/// layers degrade to shape-only output instead of failing the render.
/// The epicenter marker likewise falls back to a built-in cross.
#[derive(Default)]
pub struct MapAssets {
    font: Option<Font<'static>>,
    epicenter_marker: Option<RgbaImage>,
}

impl std::fmt::Debug for MapAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapAssets")
            .field("font", &self.font.is_some())
            .field("epicenter_marker", &self.epicenter_marker.is_some())
            .finish()
    }
}

impl MapAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF/OTF font from its raw bytes.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> MapResult<Self> {
        self.font = Some(Font::try_from_vec(bytes).ok_or(MapError::InvalidFont)?);
        Ok(self)
    }

    /// Set the epicenter marker image. Markers composite at a fixed
    /// size regardless of the supplied asset's dimensions, so oversized
    /// art is scaled down once here rather than per render.
    pub fn with_epicenter_marker(mut self, marker: RgbaImage) -> Self {
        let size = crate::icons::EPICENTER_SIZE as u32;
        self.epicenter_marker = Some(if marker.width() != size || marker.height() != size {
            imageops::resize(&marker, size, size, FilterType::Triangle)
        } else {
            marker
        });
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

// The fitter's source traits are foreign to the dataset and table
// types, so thin adapters bridge them here.
struct DatasetGeometry<'a>(&'a TopologyDataset);

impl GeometrySource for DatasetGeometry<'_> {
    fn bounds(&self) -> BoundingBox {
        self.0.bounds()
    }

    fn include_area_vertices(&self, code: &str, bounds: &mut BoundingBox) -> bool {
        match self.0.area(code) {
            Some(area) => {
                for vertex in area.vertices() {
                    bounds.include(vertex);
                }
                true
            }
            None => false,
        }
    }
}

struct TablePoints<'a>(&'a LocationTable);

impl PointSource for TablePoints<'_> {
    fn coordinate(&self, code: &str) -> Option<Coordinate> {
        self.0.coordinate(code)
    }
}

/// One ring projected to pixel space.
struct ProjectedRing<'a> {
    points: &'a [RingPoint],
    pixels: Vec<(f64, f64)>,
    visible: bool,
}

/// Renders intensity maps against one loaded topology.
///
/// All fields are immutable after construction; concurrent render calls
/// share one instance freely.
pub struct MapRenderer {
    dataset: TopologyDataset,
    locations: LocationTable,
    colors: IntensityColorModel,
    assets: MapAssets,
}

impl MapRenderer {
    pub fn new(
        dataset: TopologyDataset,
        locations: LocationTable,
        scheme: ColorScheme,
        assets: MapAssets,
    ) -> Self {
        Self {
            dataset,
            locations,
            colors: IntensityColorModel::new(scheme),
            assets,
        }
    }

    pub fn dataset(&self) -> &TopologyDataset {
        &self.dataset
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    /// Render one frame.
    ///
    /// Layers composite in fixed order: sea, land, intensity fills in
    /// ascending severity, boundary strokes, badges in ascending
    /// severity, the epicenter marker, and the side overlay. Ascending
    /// severity keeps the strongest shaking on top wherever areas or
    /// badges overlap.
    pub fn render(&self, request: &MapRequest) -> MapResult<RgbaImage> {
        if request.canvas_width == 0 || request.canvas_height == 0 {
            return Err(MapError::InvalidCanvasSize {
                width: request.canvas_width,
                height: request.canvas_height,
            });
        }
        let start = Instant::now();

        // Collapse duplicates, then order by (severity, code) so equal
        // severities draw in a stable order and repeat renders of the
        // same request produce identical bytes.
        let mut observations: Vec<(&str, IntensityLevel)> =
            request.observation_map().into_iter().collect();
        observations.sort_by(|a, b| (a.1.ordinal(), a.0).cmp(&(b.1.ordinal(), b.0)));

        let viewport = Viewport::fit(
            &FitRequest {
                observations: &observations,
                epicenter: request.epicenter,
                canvas_width: request.canvas_width,
                canvas_height: request.canvas_height,
                map_type: request.map_type,
                filter: request.filter,
                zoom: request.zoom,
            },
            &DatasetGeometry(&self.dataset),
            &TablePoints(&self.locations),
        );

        let scheme = self.colors.scheme();
        let mut canvas = RgbaImage::from_pixel(
            request.canvas_width,
            request.canvas_height,
            to_rgba(scheme.sea),
        );

        let projected = self.project_areas(&viewport, &canvas);

        // Neutral land under everything else; off-canvas rings skipped.
        let land = to_rgba(scheme.land);
        for (_, rings) in &projected {
            for ring in rings {
                if ring.visible {
                    fill_polygon(&mut canvas, &ring.pixels, land);
                }
            }
        }

        if request.map_type == MapType::AreaFill {
            // Every observed area repaints; the filter never suppresses
            // fills, it only shapes the viewport and demotes point badges.
            for &(code, level) in &observations {
                let fill = to_rgba(self.colors.colors_for(level).fill);
                if let Some(rings) = projected
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|(_, rings)| rings)
                {
                    for ring in rings {
                        if ring.visible {
                            fill_polygon(&mut canvas, &ring.pixels, fill);
                        }
                    }
                }
            }
        }

        let line = to_rgba(scheme.line);
        for (_, rings) in &projected {
            for ring in rings {
                if !ring.visible || ring.pixels.len() < 2 {
                    continue;
                }
                for i in 0..ring.pixels.len() - 1 {
                    // The trailing point classifies the edge into it.
                    let bold = ring.points[i + 1].preferred_boundary;
                    stroke_edge(&mut canvas, ring.pixels[i], ring.pixels[i + 1], bold, line);
                }
                // Closing edge: classified by the ring-leading point.
                let last = ring.pixels.len() - 1;
                stroke_edge(
                    &mut canvas,
                    ring.pixels[last],
                    ring.pixels[0],
                    ring.points[0].preferred_boundary,
                    line,
                );
            }
        }

        self.draw_badges(&mut canvas, &viewport, request, &observations);

        if let Some(epicenter) = request.epicenter {
            let (x, y) = viewport.project(epicenter);
            match &self.assets.epicenter_marker {
                Some(marker) => imageops::overlay(
                    &mut canvas,
                    marker,
                    x as i64 - marker.width() as i64 / 2,
                    y as i64 - marker.height() as i64 / 2,
                ),
                None => draw_epicenter_cross(&mut canvas, x as i32, y as i32),
            }
        }

        if let Some(overlay) = &request.side_overlay {
            imageops::overlay(&mut canvas, overlay, OVERLAY_OFFSET.0, OVERLAY_OFFSET.1);
        }

        debug!(
            width = request.canvas_width,
            height = request.canvas_height,
            observations = observations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "frame rendered"
        );
        Ok(canvas)
    }

    /// Render one frame and encode it as PNG.
    pub fn render_png(&self, request: &MapRequest) -> MapResult<Vec<u8>> {
        let frame = self.render(request)?;
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        png::encode_auto(frame.as_raw(), width, height)
    }

    /// Project every ring once; fills and strokes both read the result.
    /// A ring is visible when at least one vertex lands on the canvas.
    fn project_areas<'a>(
        &'a self,
        viewport: &Viewport,
        canvas: &RgbaImage,
    ) -> Vec<(&'a str, Vec<ProjectedRing<'a>>)> {
        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        self.dataset
            .areas()
            .iter()
            .map(|area| {
                let rings = area
                    .rings
                    .iter()
                    .map(|ring| {
                        let pixels: Vec<(f64, f64)> = ring
                            .iter()
                            .map(|p| {
                                let (x, y) = viewport.project(p.coordinate);
                                (x as f64, y as f64)
                            })
                            .collect();
                        let visible = pixels.iter().any(|&(x, y)| {
                            x >= 0.0 && x < width && y >= 0.0 && y < height
                        });
                        ProjectedRing {
                            points: ring,
                            pixels,
                            visible,
                        }
                    })
                    .collect();
                (area.code.as_str(), rings)
            })
            .collect()
    }

    fn draw_badges(
        &self,
        canvas: &mut RgbaImage,
        viewport: &Viewport,
        request: &MapRequest,
        observations: &[(&str, IntensityLevel)],
    ) {
        let max = request.max_level().unwrap_or_default();
        let font = self.assets.font.as_ref();

        for &(code, level) in observations {
            let coordinate = match self.locations.coordinate(code) {
                Some(coordinate) => coordinate,
                None => {
                    debug!(code, "no known coordinate, observation not drawn");
                    continue;
                }
            };
            let (x, y) = viewport.project(coordinate);
            let (cx, cy) = (x as i32, y as i32);
            let colors = self.colors.colors_for(level);

            let glyph = self.colors.glyph(level);
            let edge = self.colors.edge_for(level);
            match request.map_type {
                MapType::AreaIcon | MapType::AreaFill => {
                    let label = if IntensityColorModel::should_label_area(level, max) {
                        self.locations.name(code)
                    } else {
                        None
                    };
                    draw_area_badge(canvas, cx, cy, glyph, &colors, edge, font, label);
                }
                MapType::PointIcon => {
                    // Below the filter a full badge demotes to a dot.
                    if level < request.filter {
                        draw_demoted_dot(canvas, cx, cy, &colors);
                    } else {
                        draw_point_badge(canvas, cx, cy, glyph, &colors, edge, font);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_reject_garbage_font() {
        let result = MapAssets::new().with_font_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(MapError::InvalidFont)));
    }

    #[test]
    fn test_table_points_adapter() {
        let mut table = LocationTable::new();
        table.insert("100", Coordinate::new(135.0, 35.0));
        let points = TablePoints(&table);
        assert_eq!(points.coordinate("100"), Some(Coordinate::new(135.0, 35.0)));
        assert_eq!(points.coordinate("999"), None);
    }
}
