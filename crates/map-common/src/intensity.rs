//! Seismic intensity levels (JMA scale) and observations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A seismic intensity level on the JMA scale.
///
/// Totally ordered by ordinal. `Unknown` has ordinal 0 and sorts below
/// every real level; it carries its own color bucket but no glyph.
/// The 5/6 sub-levels ("weak"/"strong") are distinct ordinals that share
/// a leading digit in their short label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum IntensityLevel {
    #[default]
    Unknown = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    FiveLower = 5,
    FiveUpper = 6,
    SixLower = 7,
    SixUpper = 8,
    Seven = 9,
}

impl IntensityLevel {
    /// All real levels, ascending. Excludes `Unknown`.
    pub const ALL: [IntensityLevel; 9] = [
        IntensityLevel::One,
        IntensityLevel::Two,
        IntensityLevel::Three,
        IntensityLevel::Four,
        IntensityLevel::FiveLower,
        IntensityLevel::FiveUpper,
        IntensityLevel::SixLower,
        IntensityLevel::SixUpper,
        IntensityLevel::Seven,
    ];

    /// Ordinal used for comparisons and as the color bucket key.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Short display label: one digit, optionally followed by `+`/`-`.
    /// `Unknown` has no label.
    pub fn short_label(self) -> Option<&'static str> {
        match self {
            IntensityLevel::Unknown => None,
            IntensityLevel::One => Some("1"),
            IntensityLevel::Two => Some("2"),
            IntensityLevel::Three => Some("3"),
            IntensityLevel::Four => Some("4"),
            IntensityLevel::FiveLower => Some("5-"),
            IntensityLevel::FiveUpper => Some("5+"),
            IntensityLevel::SixLower => Some("6-"),
            IntensityLevel::SixUpper => Some("6+"),
            IntensityLevel::Seven => Some("7"),
        }
    }

    /// Display filter threshold appropriate for a bulletin whose maximum
    /// observed intensity is `self`: stronger quakes hide the weakest
    /// observations so the map stays readable.
    pub fn default_filter(self) -> IntensityLevel {
        match self {
            IntensityLevel::FiveLower | IntensityLevel::FiveUpper => IntensityLevel::Two,
            IntensityLevel::SixLower | IntensityLevel::SixUpper => IntensityLevel::Three,
            IntensityLevel::Seven => IntensityLevel::Four,
            _ => IntensityLevel::One,
        }
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label().unwrap_or("?"))
    }
}

impl FromStr for IntensityLevel {
    type Err = ();

    /// Parse a report string. Unrecognized values map to `Unknown`
    /// rather than failing: upstream bulletins occasionally carry
    /// placeholder intensities.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "1" => IntensityLevel::One,
            "2" => IntensityLevel::Two,
            "3" => IntensityLevel::Three,
            "4" => IntensityLevel::Four,
            "5-" | "5弱" => IntensityLevel::FiveLower,
            "5+" | "5強" => IntensityLevel::FiveUpper,
            "6-" | "6弱" => IntensityLevel::SixLower,
            "6+" | "6強" => IntensityLevel::SixUpper,
            "7" => IntensityLevel::Seven,
            _ => IntensityLevel::Unknown,
        })
    }
}

/// One observed intensity at a station or area, keyed by location code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityObservation {
    pub code: String,
    pub level: IntensityLevel,
}

impl IntensityObservation {
    pub fn new(code: impl Into<String>, level: IntensityLevel) -> Self {
        Self {
            code: code.into(),
            level,
        }
    }
}
