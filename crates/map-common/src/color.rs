//! RGBA colors and the resolved intensity color scheme.
//!
//! Schemes are externally supplied and swappable: they can be loaded from
//! a JSON document of hex-color strings or taken from the built-in dark
//! scheme. Rendering code only ever sees the resolved [`ColorScheme`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};
use crate::intensity::IntensityLevel;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA" (leading '#' optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }
}

/// The (fill, text, edge) triple for one intensity color bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityColors {
    /// Badge and area fill color.
    pub fill: Color,
    /// Glyph color chosen for contrast against the fill.
    pub text: Color,
    /// Badge border; `None` means the scheme-wide badge edge applies.
    pub edge: Option<Color>,
}

/// A fully resolved color scheme.
///
/// Keyed by the intensity ordinal, with a dedicated bucket for
/// `Unknown` (ordinal 0). Buckets missing from a loaded document fall
/// back to the unknown bucket at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub sea: Color,
    pub land: Color,
    pub line: Color,
    /// Default badge border when a bucket defines none.
    pub badge_edge: Color,
    levels: HashMap<u8, IntensityColors>,
}

impl ColorScheme {
    /// Colors for an intensity level. Falls back to the `Unknown` bucket
    /// for any ordinal the scheme does not define.
    pub fn colors_for(&self, level: IntensityLevel) -> IntensityColors {
        self.levels
            .get(&level.ordinal())
            .or_else(|| self.levels.get(&IntensityLevel::Unknown.ordinal()))
            .copied()
            .unwrap_or(IntensityColors {
                fill: Color::rgb(128, 128, 128),
                text: Color::rgb(255, 255, 255),
                edge: None,
            })
    }

    /// Parse a scheme from a JSON document of hex-color strings.
    pub fn from_json(json: &str) -> MapResult<Self> {
        let config: SchemeConfig = serde_json::from_str(json)
            .map_err(|e| MapError::InvalidColorScheme(e.to_string()))?;
        config.resolve()
    }

    /// The built-in dark scheme: muted sea/land grays with the standard
    /// intensity ramp from pale blue through red to purple.
    pub fn dark() -> Self {
        // Text is dark on the mid-intensity (bright) fills, light elsewhere.
        let text_for = |ordinal: u8| {
            if (3..=6).contains(&ordinal) {
                Color::new(0, 0, 0, 240)
            } else {
                Color::new(255, 255, 255, 240)
            }
        };

        let fills: [(u8, Color); 10] = [
            (0, Color::rgb(230, 0, 0)), // unknown: presumed 5- or stronger
            (1, Color::rgb(70, 100, 110)),
            (2, Color::rgb(30, 110, 230)),
            (3, Color::rgb(0, 200, 200)),
            (4, Color::rgb(250, 250, 100)),
            (5, Color::rgb(255, 180, 0)),
            (6, Color::rgb(255, 120, 0)),
            (7, Color::rgb(230, 0, 0)),
            (8, Color::rgb(160, 0, 0)),
            (9, Color::rgb(150, 0, 150)),
        ];

        let levels = fills
            .into_iter()
            .map(|(ordinal, fill)| {
                (
                    ordinal,
                    IntensityColors {
                        fill,
                        text: text_for(ordinal),
                        edge: None,
                    },
                )
            })
            .collect();

        Self {
            sea: Color::rgb(37, 37, 50),
            land: Color::rgb(50, 50, 50),
            line: Color::rgb(120, 120, 120),
            badge_edge: Color::rgb(222, 222, 222),
            levels,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// JSON shape for a scheme document.
#[derive(Debug, Deserialize)]
struct SchemeConfig {
    sea: String,
    land: String,
    line: String,
    #[serde(default)]
    badge_edge: Option<String>,
    /// Keys are ordinals ("1".."9") or "unknown".
    levels: HashMap<String, LevelConfig>,
}

#[derive(Debug, Deserialize)]
struct LevelConfig {
    fill: String,
    text: String,
    #[serde(default)]
    edge: Option<String>,
}

impl SchemeConfig {
    fn resolve(self) -> MapResult<ColorScheme> {
        let parse = |field: &str, hex: &str| {
            Color::from_hex(hex).ok_or_else(|| {
                MapError::InvalidColorScheme(format!("bad color for '{}': {}", field, hex))
            })
        };

        let mut levels = HashMap::with_capacity(self.levels.len());
        for (key, level) in &self.levels {
            let ordinal = match key.as_str() {
                "unknown" => 0u8,
                other => other.parse::<u8>().map_err(|_| {
                    MapError::InvalidColorScheme(format!("bad level key: {}", other))
                })?,
            };
            let edge = match &level.edge {
                Some(hex) => Some(parse(key, hex)?),
                None => None,
            };
            levels.insert(
                ordinal,
                IntensityColors {
                    fill: parse(key, &level.fill)?,
                    text: parse(key, &level.text)?,
                    edge,
                },
            );
        }

        Ok(ColorScheme {
            sea: parse("sea", &self.sea)?,
            land: parse("land", &self.land)?,
            line: parse("line", &self.line)?,
            badge_edge: match &self.badge_edge {
                Some(hex) => parse("badge_edge", hex)?,
                None => Color::rgb(222, 222, 222),
            },
            levels,
        })
    }
}
