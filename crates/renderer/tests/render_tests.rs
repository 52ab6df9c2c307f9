//! End-to-end render tests over a tiny two-square topology.
//!
//! Square A ("01001") covers lon 0..1, square B ("02001") lon 1..2,
//! both lat 0..1. With a 200x100 canvas and the area-fill margin the
//! fallback fit lands square A's interior well away from any stroke,
//! so individual layer colors can be probed by pixel.

use image::{Rgba, RgbaImage};

use map_common::{
    ColorScheme, Coordinate, IntensityLevel, IntensityObservation, LocationTable, MapError,
    MapType,
};
use renderer::{MapAssets, MapRenderer, MapRequest};
use topology::TopologyDataset;

const SEA: Rgba<u8> = Rgba([37, 37, 50, 255]);
const LAND: Rgba<u8> = Rgba([50, 50, 50, 255]);

fn two_square_document() -> &'static str {
    r#"{
        "arcs": [
            [[1, 1], [0, -1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ],
        "transform": { "scale": [1.0, 1.0], "translate": [0.0, 0.0] },
        "objects": {
            "area": {
                "geometries": [
                    { "type": "Polygon", "arcs": [[1, -1]], "properties": { "code": "01001" } },
                    { "type": "Polygon", "arcs": [[0, 2]], "properties": { "code": "02001" } }
                ]
            }
        }
    }"#
}

fn renderer() -> MapRenderer {
    let dataset = TopologyDataset::from_json(two_square_document(), "area").unwrap();
    let mut locations = LocationTable::new();
    locations.insert("01001", Coordinate::new(0.5, 0.5));
    locations.insert("02001", Coordinate::new(1.5, 0.5));
    // Two stations sharing square A's center.
    locations.insert("0100110", Coordinate::new(0.5, 0.5));
    locations.insert("0100120", Coordinate::new(0.5, 0.5));
    MapRenderer::new(dataset, locations, ColorScheme::dark(), MapAssets::new())
}

fn contains(canvas: &RgbaImage, color: Rgba<u8>) -> bool {
    canvas.pixels().any(|p| *p == color)
}

#[test]
fn sea_background_outside_land() {
    let renderer = renderer();
    let request = MapRequest::new(vec![], 200, 100, MapType::AreaFill, IntensityLevel::One);

    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(5, 5), &SEA);
}

#[test]
fn land_fill_covers_area_interior() {
    let renderer = renderer();
    let request = MapRequest::new(vec![], 200, 100, MapType::AreaFill, IntensityLevel::One);

    // Fallback fit over lon 0..2, lat 0..1 with a 40px margin puts
    // square A's center at (90, 30).
    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(90, 30), &LAND);
}

#[test]
fn area_fill_paints_observed_intensity() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![IntensityObservation::new("01001", IntensityLevel::Four)],
        200,
        100,
        MapType::AreaFill,
        IntensityLevel::One,
    );

    // The fit tightens to square A alone; its center lands at (120, 30).
    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(120, 30), &Rgba([250, 250, 100, 255]));
    assert!(!contains(&canvas, Rgba([255, 180, 0, 255])));
}

#[test]
fn below_filter_area_still_fills_intensity() {
    // The filter shapes the viewport and demotes point badges only;
    // every observed area repaints in its intensity color.
    let renderer = renderer();
    let request = MapRequest::new(
        vec![IntensityObservation::new("01001", IntensityLevel::Two)],
        200,
        100,
        MapType::AreaFill,
        IntensityLevel::Four,
    );

    // Two < Four leaves the viewport on the fallback bounds, which put
    // square A's center at (90, 30).
    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(90, 30), &Rgba([30, 110, 230, 255]));
}

#[test]
fn below_filter_area_badge_still_draws() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![IntensityObservation::new("01001", IntensityLevel::Two)],
        400,
        400,
        MapType::AreaIcon,
        IntensityLevel::Four,
    );

    let canvas = renderer.render(&request).unwrap();
    assert!(contains(&canvas, Rgba([30, 110, 230, 255])));
    assert!(contains(&canvas, Rgba([222, 222, 222, 255])));
}

#[test]
fn stronger_badge_draws_over_weaker_at_same_point() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![
            IntensityObservation::new("0100120", IntensityLevel::FiveLower),
            IntensityObservation::new("0100110", IntensityLevel::Three),
        ],
        200,
        100,
        MapType::PointIcon,
        IntensityLevel::One,
    );

    // Both badges share one center; ascending severity leaves only the
    // stronger one's fill visible.
    let canvas = renderer.render(&request).unwrap();
    assert!(contains(&canvas, Rgba([255, 180, 0, 255])));
    assert!(!contains(&canvas, Rgba([0, 200, 200, 255])));
}

#[test]
fn below_filter_point_demotes_to_dot() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![IntensityObservation::new("0100110", IntensityLevel::Two)],
        200,
        100,
        MapType::PointIcon,
        IntensityLevel::Four,
    );

    let canvas = renderer.render(&request).unwrap();
    // The dot carries the level's fill; no badge edge is drawn.
    assert!(contains(&canvas, Rgba([30, 110, 230, 255])));
    assert!(!contains(&canvas, Rgba([222, 222, 222, 255])));
}

#[test]
fn unknown_station_code_is_skipped() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![IntensityObservation::new("9999999", IntensityLevel::Seven)],
        200,
        100,
        MapType::PointIcon,
        IntensityLevel::One,
    );

    let canvas = renderer.render(&request).unwrap();
    assert!(!contains(&canvas, Rgba([150, 0, 150, 255])));
}

#[test]
fn epicenter_falls_back_to_builtin_cross() {
    let renderer = renderer();
    let request = MapRequest::new(vec![], 200, 100, MapType::PointIcon, IntensityLevel::One)
        .with_epicenter(Coordinate::new(1.0, 0.5));

    let canvas = renderer.render(&request).unwrap();
    assert!(contains(&canvas, Rgba([230, 0, 0, 255])));
}

#[test]
fn epicenter_marker_composites_at_fixed_size() {
    let dataset = TopologyDataset::from_json(two_square_document(), "area").unwrap();
    let marker = RgbaImage::from_pixel(100, 100, Rgba([0, 255, 0, 255]));
    let renderer = MapRenderer::new(
        dataset,
        LocationTable::new(),
        ColorScheme::dark(),
        MapAssets::new().with_epicenter_marker(marker),
    );
    let request = MapRequest::new(vec![], 200, 100, MapType::PointIcon, IntensityLevel::One)
        .with_epicenter(Coordinate::new(1.0, 0.5));

    // The single-point fit centers the epicenter at (136, 14); the
    // oversized marker scales down to 30px, spanning x 121..=150.
    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(136, 14), &Rgba([0, 255, 0, 255]));
    assert_ne!(canvas.get_pixel(165, 14), &Rgba([0, 255, 0, 255]));
}

#[test]
fn side_overlay_composites_at_fixed_offset() {
    let renderer = renderer();
    let overlay = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 255, 255]));
    let request = MapRequest::new(vec![], 200, 100, MapType::AreaFill, IntensityLevel::One)
        .with_side_overlay(overlay);

    let canvas = renderer.render(&request).unwrap();
    assert_eq!(canvas.get_pixel(9, 11), &Rgba([255, 0, 255, 255]));
    assert_eq!(canvas.get_pixel(13, 15), &SEA);
}

#[test]
fn repeat_renders_are_byte_identical() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![
            IntensityObservation::new("01001", IntensityLevel::FiveUpper),
            IntensityObservation::new("02001", IntensityLevel::FiveUpper),
            IntensityObservation::new("0100110", IntensityLevel::Three),
        ],
        200,
        100,
        MapType::AreaFill,
        IntensityLevel::One,
    )
    .with_epicenter(Coordinate::new(1.0, 0.5));

    let first = renderer.render(&request).unwrap();
    let second = renderer.render(&request).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn duplicate_codes_render_last_entry() {
    let renderer = renderer();
    let request = MapRequest::new(
        vec![
            IntensityObservation::new("01001", IntensityLevel::Seven),
            IntensityObservation::new("01001", IntensityLevel::One),
        ],
        200,
        100,
        MapType::AreaFill,
        IntensityLevel::One,
    );

    let canvas = renderer.render(&request).unwrap();
    assert!(contains(&canvas, Rgba([70, 100, 110, 255])));
    assert!(!contains(&canvas, Rgba([150, 0, 150, 255])));
}

#[test]
fn zero_canvas_is_rejected() {
    let renderer = renderer();
    let request = MapRequest::new(vec![], 0, 100, MapType::AreaFill, IntensityLevel::One);

    assert!(matches!(
        renderer.render(&request),
        Err(MapError::InvalidCanvasSize {
            width: 0,
            height: 100
        })
    ));
}

#[test]
fn render_png_emits_signature() {
    let renderer = renderer();
    let request = MapRequest::new(vec![], 64, 64, MapType::AreaFill, IntensityLevel::One);

    let png = renderer.render_png(&request).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}
