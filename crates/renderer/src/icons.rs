//! Intensity badges, the epicenter marker, and their glyph layout.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};

use map_common::IntensityColors;

use crate::draw::{draw_outlined_text, to_rgba};
use crate::style::{Glyph, Modifier};

/// Pixel layout of an intensity glyph inside a badge.
///
/// All offsets are relative to the badge's top-left corner. The digit
/// shifts left by `modifier_shift` when a `+`/`-` modifier follows it,
/// making room without growing the badge.
#[derive(Debug, Clone, Copy)]
pub struct GlyphLayout {
    pub badge_size: i32,
    pub digit_offset: (i32, i32),
    pub digit_size: f32,
    pub modifier_shift: i32,
    pub plus_offset: (i32, i32),
    pub plus_size: f32,
    pub stroke_offset: (i32, i32),
    pub stroke_length: i32,
    pub stroke_width: i32,
}

/// Layout for the 22px square badge used on area maps.
pub const AREA_BADGE: GlyphLayout = GlyphLayout {
    badge_size: 22,
    digit_offset: (2, -1),
    digit_size: 21.0,
    modifier_shift: 3,
    plus_offset: (9, -3),
    plus_size: 18.0,
    stroke_offset: (13, 7),
    stroke_length: 7,
    stroke_width: 2,
};

/// Layout for the 18px circular badge used on point maps.
pub const POINT_BADGE: GlyphLayout = GlyphLayout {
    badge_size: 18,
    digit_offset: (2, 1),
    digit_size: 16.0,
    modifier_shift: 2,
    plus_offset: (9, 0),
    plus_size: 11.0,
    stroke_offset: (10, 7),
    stroke_length: 5,
    stroke_width: 2,
};

/// Diameter of the small dot drawn for observations below the filter.
pub const DEMOTED_DOT_SIZE: i32 = 8;

/// Side length of the built-in epicenter cross.
pub const EPICENTER_SIZE: i32 = 30;

fn draw_glyph(
    canvas: &mut RgbaImage,
    left: i32,
    top: i32,
    layout: &GlyphLayout,
    glyph: Glyph,
    text_color: Rgba<u8>,
    font: &Font<'_>,
) {
    let shift = if glyph.modifier.is_some() {
        layout.modifier_shift
    } else {
        0
    };
    let mut digit = [0u8; 4];
    draw_text_mut(
        canvas,
        text_color,
        left + layout.digit_offset.0 - shift,
        top + layout.digit_offset.1,
        Scale::uniform(layout.digit_size),
        font,
        glyph.digit.encode_utf8(&mut digit),
    );
    match glyph.modifier {
        Some(Modifier::Plus) => {
            draw_text_mut(
                canvas,
                text_color,
                left + layout.plus_offset.0,
                top + layout.plus_offset.1,
                Scale::uniform(layout.plus_size),
                font,
                "+",
            );
        }
        Some(Modifier::MinusStroke) => {
            draw_filled_rect_mut(
                canvas,
                Rect::at(left + layout.stroke_offset.0, top + layout.stroke_offset.1)
                    .of_size(layout.stroke_length as u32, layout.stroke_width as u32),
                text_color,
            );
        }
        None => {}
    }
}

/// Draws the square area badge centered on `(cx, cy)`.
///
/// `label`, when present, is painted to the badge's upper right with a
/// dark outline; it is skipped entirely when no font is loaded.
#[allow(clippy::too_many_arguments)]
pub fn draw_area_badge(
    canvas: &mut RgbaImage,
    cx: i32,
    cy: i32,
    glyph: Option<Glyph>,
    colors: &IntensityColors,
    edge: map_common::Color,
    font: Option<&Font<'_>>,
    label: Option<&str>,
) {
    let size = AREA_BADGE.badge_size;
    let left = cx - size / 2;
    let top = cy - size / 2;

    draw_filled_rect_mut(
        canvas,
        Rect::at(left, top).of_size(size as u32, size as u32),
        to_rgba(colors.fill),
    );
    let edge = to_rgba(edge);
    draw_hollow_rect_mut(
        canvas,
        Rect::at(left, top).of_size(size as u32, size as u32),
        edge,
    );
    draw_hollow_rect_mut(
        canvas,
        Rect::at(left + 1, top + 1).of_size(size as u32 - 2, size as u32 - 2),
        edge,
    );

    if let Some(font) = font {
        if let Some(glyph) = glyph {
            draw_glyph(canvas, left, top, &AREA_BADGE, glyph, to_rgba(colors.text), font);
        }
        if let Some(label) = label {
            draw_outlined_text(canvas, left + size + 2, top - 2, 20.0, font, label);
        }
    }
}

/// Draws the circular point badge centered on `(cx, cy)`.
pub fn draw_point_badge(
    canvas: &mut RgbaImage,
    cx: i32,
    cy: i32,
    glyph: Option<Glyph>,
    colors: &IntensityColors,
    edge: map_common::Color,
    font: Option<&Font<'_>>,
) {
    let size = POINT_BADGE.badge_size;
    let radius = size / 2;
    draw_filled_circle_mut(canvas, (cx, cy), radius, to_rgba(colors.fill));
    draw_hollow_circle_mut(canvas, (cx, cy), radius, to_rgba(edge));

    if let (Some(font), Some(glyph)) = (font, glyph) {
        draw_glyph(
            canvas,
            cx - radius,
            cy - radius,
            &POINT_BADGE,
            glyph,
            to_rgba(colors.text),
            font,
        );
    }
}

/// Draws the small dot used for observations below the severity filter.
pub fn draw_demoted_dot(canvas: &mut RgbaImage, cx: i32, cy: i32, colors: &IntensityColors) {
    draw_filled_circle_mut(canvas, (cx, cy), DEMOTED_DOT_SIZE / 2, to_rgba(colors.fill));
}

/// Built-in epicenter cross, used when no marker image is supplied.
pub fn draw_epicenter_cross(canvas: &mut RgbaImage, cx: i32, cy: i32) {
    let red = Rgba([230u8, 0, 0, 255]);
    let half = EPICENTER_SIZE / 2;
    for offset in -1..=1i32 {
        crate::draw::stroke_edge(
            canvas,
            ((cx - half + offset) as f64, (cy - half) as f64),
            ((cx + half + offset) as f64, (cy + half) as f64),
            true,
            red,
        );
        crate::draw::stroke_edge(
            canvas,
            ((cx - half + offset) as f64, (cy + half) as f64),
            ((cx + half + offset) as f64, (cy - half) as f64),
            true,
            red,
        );
    }
}
