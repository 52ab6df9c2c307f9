//! Low-level raster helpers shared by the map and badge layers.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, draw_text_mut};
use imageproc::point::Point;
use rusttype::{Font, Scale};

use map_common::Color;

/// Converts a scheme color to the pixel type used by the canvas.
pub fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Fills a closed ring given in pixel space.
///
/// Rounds vertices to integer pixels and drops consecutive duplicates
/// produced by the rounding; `draw_polygon_mut` rejects polygons whose
/// first and last points coincide, so a trailing duplicate is dropped
/// too. Rings that collapse below three distinct vertices are skipped.
pub fn fill_polygon(canvas: &mut RgbaImage, vertices: &[(f64, f64)], color: Rgba<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
    for &(x, y) in vertices {
        let p = Point::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &points, color);
}

/// Strokes one polygon edge at the requested weight.
///
/// A bold edge is drawn as three parallel passes, the extra two offset
/// one pixel perpendicular to the segment, which approximates a 2.5px
/// stroke without an explicit line-width primitive.
pub fn stroke_edge(
    canvas: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    bold: bool,
    color: Rgba<u8>,
) {
    let start = (from.0 as f32, from.1 as f32);
    let end = (to.0 as f32, to.1 as f32);
    draw_line_segment_mut(canvas, start, end, color);
    if !bold {
        return;
    }
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return;
    }
    // Unit perpendicular, offset one pixel each side.
    let px = -dy / len;
    let py = dx / len;
    draw_line_segment_mut(
        canvas,
        (start.0 + px, start.1 + py),
        (end.0 + px, end.1 + py),
        color,
    );
    draw_line_segment_mut(
        canvas,
        (start.0 - px, start.1 - py),
        (end.0 - px, end.1 - py),
        color,
    );
}

/// Draws `text` with a one-pixel dark outline so labels stay readable
/// over both land and intensity fills.
pub fn draw_outlined_text(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    size: f32,
    font: &Font<'_>,
    text: &str,
) {
    let scale = Scale::uniform(size);
    let outline = Rgba([0u8, 0, 0, 255]);
    let fill = Rgba([255u8, 255, 255, 255]);
    for (ox, oy) in [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ] {
        draw_text_mut(canvas, outline, x + ox, y + oy, scale, font, text);
    }
    draw_text_mut(canvas, fill, x, y, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_polygon_paints_interior() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let red = Rgba([255, 0, 0, 255]);
        fill_polygon(
            &mut canvas,
            &[(2.0, 2.0), (17.0, 2.0), (17.0, 17.0), (2.0, 17.0)],
            red,
        );
        assert_eq!(canvas.get_pixel(10, 10), &red);
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_polygon_tolerates_closed_ring_input() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let red = Rgba([255, 0, 0, 255]);
        // Last vertex repeats the first; must not panic.
        fill_polygon(
            &mut canvas,
            &[(1.0, 1.0), (8.0, 1.0), (8.0, 8.0), (1.0, 8.0), (1.0, 1.0)],
            red,
        );
        assert_eq!(canvas.get_pixel(4, 4), &red);
    }

    #[test]
    fn test_fill_polygon_skips_degenerate_rings() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        fill_polygon(
            &mut canvas,
            &[(1.2, 1.2), (1.4, 1.4)],
            Rgba([255, 0, 0, 255]),
        );
        assert_eq!(canvas.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_bold_stroke_is_wider_than_plain() {
        let white = Rgba([255, 255, 255, 255]);
        let mut plain = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let mut bold = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        stroke_edge(&mut plain, (2.0, 10.0), (18.0, 10.0), false, white);
        stroke_edge(&mut bold, (2.0, 10.0), (18.0, 10.0), true, white);

        let lit = |img: &RgbaImage| img.pixels().filter(|p| p.0[0] > 0).count();
        assert!(lit(&bold) > lit(&plain));
    }
}
